//! # Row Mapping Module
//!
//! Turns spreadsheet rows into records. Each cell is matched to a field of the
//! record's [`Schema`], first by its position in the row and then by its column
//! letters, and the cell's value is coerced to the field's declared type
//! before being written through the field's setter.
use crate::error::SheetMapperError;
use crate::spreadsheet::{Cell, Row, Spreadsheet, XlsxSpreadsheet};
use log::{debug, trace};
use std::io::Read;
use std::path::Path;
use thiserror::Error;

pub mod options;
pub mod schema;
pub mod value;

use options::{ConversionPolicy, MapperOptions};
use schema::{FieldDescriptor, Schema, SheetRecord};
use value::{convert, try_convert, Value, ValueType};

/// Errors raised while filling records.
#[derive(Error, Debug)]
pub enum MappingError {
    /// The record factory failed
    #[error("Construct record failed: {0}")]
    ConstructionError(anyhow::Error),

    /// A value doesn't fit its field under the strict policy
    #[error("Convert value '{value}' of field '{field}' to {kind} failed")]
    ConversionError {
        field: String,
        value: String,
        kind: ValueType,
    },
}

type Factory<R> = Box<dyn Fn() -> anyhow::Result<R>>;

/// Maps spreadsheet rows into records of type `R`.
///
/// The schema is built once when the mapper is created and reused by every call.
pub struct RowMapper<R> {
    schema: Schema<R>,
    factory: Factory<R>,
    options: MapperOptions,
}

impl<R: SheetRecord + Default + 'static> RowMapper<R> {
    /// Mapper using the record's own schema and `Default` as the factory
    pub fn new() -> Self {
        Self::with_factory(R::schema(), || Ok(R::default()))
    }
}

impl<R: SheetRecord + Default + 'static> Default for RowMapper<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> RowMapper<R> {
    /// Mapper with an explicit schema and record factory
    pub fn with_factory<F>(schema: Schema<R>, factory: F) -> Self
    where
        F: Fn() -> anyhow::Result<R> + 'static,
    {
        RowMapper {
            schema,
            factory: Box::new(factory),
            options: MapperOptions::default(),
        }
    }

    pub fn with_options(mut self, options: MapperOptions) -> Self {
        self.options = options;
        self
    }

    pub fn schema(&self) -> &Schema<R> {
        &self.schema
    }

    pub fn options(&self) -> &MapperOptions {
        &self.options
    }

    /// Maps every row at or after the 1-based `start_row` of each selected
    /// sheet into one record, in sheet then row order.
    ///
    /// Rows matching no field still produce a record. Any error aborts the
    /// whole call.
    pub fn map<S: Spreadsheet + ?Sized>(
        &self,
        spreadsheet: &mut S,
        start_row: usize,
    ) -> Result<Vec<R>, SheetMapperError> {
        let sheets = spreadsheet.read_sheets(&self.options.criteria())?;
        let mut records = Vec::new();
        for sheet in &sheets {
            for row in sheet.rows_from(start_row) {
                records.push(self.map_row(&*spreadsheet, row)?);
            }
        }
        debug!(
            "Mapped {} records from {} worksheets of '{}'",
            records.len(),
            sheets.len(),
            spreadsheet.name()
        );
        Ok(records)
    }

    /// Opens an xlsx package from a stream and maps it; the package is
    /// released before returning.
    pub fn map_reader<RS: Read>(&self, reader: RS, start_row: usize) -> Result<Vec<R>, SheetMapperError> {
        let mut spreadsheet = XlsxSpreadsheet::from_reader(reader)?;
        self.map(&mut spreadsheet, start_row)
    }

    /// Opens an xlsx file and maps it.
    pub fn map_file<P: AsRef<Path>>(&self, path: P, start_row: usize) -> Result<Vec<R>, SheetMapperError> {
        let mut spreadsheet = XlsxSpreadsheet::open(path)?;
        self.map(&mut spreadsheet, start_row)
    }

    fn map_row<S: Spreadsheet + ?Sized>(&self, spreadsheet: &S, row: &Row) -> Result<R, SheetMapperError> {
        let mut record = (self.factory)().map_err(MappingError::ConstructionError)?;
        // Position counts cell elements, not the column in the reference
        for (position, cell) in row.cells.iter().enumerate() {
            let letters = cell.column();
            let field = match self.schema.resolve(position, &letters) {
                Some(field) => field,
                None => {
                    trace!("No field for cell {} at position {}", cell.reference, position);
                    continue;
                }
            };
            if field.ignored {
                continue;
            }
            let value = cell_value(spreadsheet, cell)?;
            let value = self.convert(field, value)?;
            field.set(&mut record, value);
        }
        Ok(record)
    }

    fn convert(&self, field: &FieldDescriptor<R>, value: Value) -> Result<Value, SheetMapperError> {
        match self.options.conversion {
            ConversionPolicy::Strict => Ok(try_convert(field.name, value, field.kind)?),
            ConversionPolicy::Lenient => {
                let converted = convert(value, field.kind);
                if !converted.is_null() && !converted.conforms_to(field.kind) {
                    debug!("Keep value '{}' of field '{}' unconverted to {}", converted, field.name, field.kind);
                }
                Ok(converted)
            }
        }
    }
}

/// Effective value of a cell: shared strings are looked up, anything else
/// is taken verbatim.
fn cell_value<S: Spreadsheet + ?Sized>(spreadsheet: &S, cell: &Cell) -> Result<Value, SheetMapperError> {
    if cell.is_shared_string() {
        let index = cell.shared_string_index()?;
        Ok(Value::from(spreadsheet.shared_string(index)?))
    } else {
        Ok(Value::from(cell.value.as_str()))
    }
}
