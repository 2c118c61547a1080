//! # Sheet Mapper
//!
//! Maps the rows of Excel workbooks (`.xlsx`, `.xlsm`) into caller-defined
//! record types.
//!
//! ## Features
//!
//! - **Column binding**: Bind each record field to a 1-based column position, to
//!   column letters such as `"B"` or `"AA"`, or to both; position wins
//! - **Ignored fields**: Exclude a field from mapping while it keeps its column
//! - **Type coercion**: Text cells bound to integer fields are parsed; values that
//!   don't parse are kept as-is, or rejected under the strict policy
//! - **Shared strings**: Cells pointing into the workbook's shared string table
//!   are resolved transparently
//! - **Sheet selection**: Every worksheet is mapped in workbook order, optionally
//!   narrowed by glob patterns on sheet names
//!
//! ## Example
//!
//! ```no_run
//! use sheet_mapper::{map_excel, FieldDescriptor, Schema, SheetRecord, Value, ValueType};
//! use std::fs::File;
//!
//! #[derive(Default)]
//! struct Person {
//!     name: Value,
//!     age: Value,
//! }
//!
//! impl SheetRecord for Person {
//!     fn schema() -> Schema<Self> {
//!         Schema::new(vec![
//!             FieldDescriptor::new("name", ValueType::Text, |p: &mut Self, v| p.name = v).column_index(1),
//!             FieldDescriptor::new("age", ValueType::Integer, |p: &mut Self, v| p.age = v).column_name("B"),
//!         ])
//!     }
//! }
//!
//! let people: Vec<Person> = map_excel(File::open("people.xlsx")?, 2)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
mod error;
mod helpers;
pub mod mapping;
pub mod spreadsheet;

pub use error::SheetMapperError;
pub use helpers::xml::XmlError;
pub use mapping::options::{ConversionPolicy, MapperOptions};
pub use mapping::schema::{FieldDescriptor, FieldSetter, Schema, SheetRecord};
pub use mapping::value::{convert, try_convert, Value, ValueType};
pub use mapping::{MappingError, RowMapper};
pub use spreadsheet::{Cell, CellType, Criteria, Row, Sheet, Spreadsheet, SpreadsheetError, XlsxSpreadsheet};

use std::io::Read;

/// Reads an xlsx package from `reader` and maps every row at or after the
/// 1-based `start_row` of every worksheet into a record of type `R`.
///
/// Rows before `start_row` (usually a header) are skipped in each sheet.
/// Records come back in sheet order, then row order. The stream is consumed
/// and released before returning, on success or failure.
///
/// # Errors
///
/// Returns an error if the stream is not a readable xlsx package, if a
/// worksheet is malformed, or if a shared-string reference is out of range.
/// No partial result is returned.
pub fn map_excel<R, RS>(reader: RS, start_row: usize) -> Result<Vec<R>, SheetMapperError>
where
    R: SheetRecord + Default + 'static,
    RS: Read,
{
    RowMapper::<R>::new().map_reader(reader, start_row)
}
