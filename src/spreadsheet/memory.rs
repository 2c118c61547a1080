//! In-memory spreadsheet for exercising the mapper without a package

use crate::error::SheetMapperError;
use crate::spreadsheet::reference::index_to_reference;
use crate::spreadsheet::{Cell, CellType, Criteria, Row, Sheet, Spreadsheet, SpreadsheetError};

#[derive(Default)]
pub(crate) struct MemorySpreadsheet {
    pub(crate) sheets: Vec<Sheet>,
    pub(crate) shared_strings: Vec<String>,
}

impl MemorySpreadsheet {
    /// Adds a sheet whose rows hold literal cells laid out from column A
    pub(crate) fn sheet(mut self, name: &str, rows: &[&[&str]]) -> Self {
        let mut sheet = Sheet::new(name);
        for (index, values) in rows.iter().enumerate() {
            let mut row = Row::new(index + 1);
            for (col, value) in values.iter().enumerate() {
                row.push(Cell::new(&index_to_reference(index, col), CellType::InlineString, value));
            }
            sheet.rows.push(row);
        }
        self.sheets.push(sheet);
        self
    }

    /// Adds a sheet with hand-built rows
    pub(crate) fn rows(mut self, name: &str, rows: Vec<Row>) -> Self {
        let mut sheet = Sheet::new(name);
        sheet.rows = rows;
        self.sheets.push(sheet);
        self
    }

    pub(crate) fn shared_strings(mut self, strings: &[&str]) -> Self {
        self.shared_strings = strings.iter().map(|string| string.to_string()).collect();
        self
    }
}

impl Spreadsheet for MemorySpreadsheet {
    fn name(&self) -> String {
        "memory".to_owned()
    }

    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|sheet| sheet.name.to_owned()).collect()
    }

    fn read_sheets(&mut self, criteria: &Criteria) -> Result<Vec<Sheet>, SheetMapperError> {
        Ok(self
            .sheets
            .iter()
            .filter(|sheet| criteria.accept(&sheet.name))
            .cloned()
            .collect())
    }

    fn shared_string(&self, index: usize) -> Result<&str, SheetMapperError> {
        self.shared_strings
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| SpreadsheetError::SharedStringIndexError(index.to_string()).into())
    }
}
