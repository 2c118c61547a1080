//! # Spreadsheet Reading Module
//!
//! Reads Office Open XML workbooks (.xlsx, .xlsm) into worksheets of raw
//! cells. Values are kept as the text stored in the package; shared-string
//! cells keep their table index and are resolved on demand through
//! [`Spreadsheet::shared_string`].
use crate::error::SheetMapperError;
use thiserror::Error;

pub mod cell;
pub mod criteria;
pub(crate) mod excel;
pub mod reference;
pub mod sheet;
pub mod xlsx;

#[cfg(test)]
pub(crate) mod memory;

pub use cell::{Cell, CellType};
pub use criteria::Criteria;
pub use sheet::{Row, Sheet};
pub use xlsx::XlsxSpreadsheet;

/// Errors raised while reading a spreadsheet document.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    /// The input is not a readable spreadsheet package
    #[error("Invalid spreadsheet document: {0}")]
    DocumentFormatError(String),

    /// A shared-string reference is malformed or out of range
    #[error("Shared string index '{0}' is out of range")]
    SharedStringIndexError(String),

    /// A part referenced by the workbook is missing from the package
    #[error("Missing file '{0}' in spreadsheet package")]
    FileError(String),
}

/// A spreadsheet document opened for reading.
pub trait Spreadsheet {
    /// File name of the document
    fn name(&self) -> String;

    /// Worksheet names in workbook order
    fn sheet_names(&self) -> Vec<String>;

    /// Reads the worksheets accepted by `criteria`, in workbook order
    fn read_sheets(&mut self, criteria: &Criteria) -> Result<Vec<Sheet>, SheetMapperError>;

    /// Resolves a shared-string table index to its text
    fn shared_string(&self, index: usize) -> Result<&str, SheetMapperError>;
}
