use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::reference::index_to_reference;

/// A row of cells in document order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    /// 1-based row number
    pub number: usize,
    /// Cells as they appear in the row element; gaps are not filled
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(number: usize) -> Self {
        Row {
            number,
            cells: Vec::new(),
        }
    }

    /// Appends a cell. A missing reference is synthesised from the row
    /// number and the cell's position within the row.
    pub(crate) fn push(&mut self, mut cell: Cell) {
        if cell.reference.is_empty() {
            cell.reference = index_to_reference(self.number.saturating_sub(1), self.cells.len());
        }
        self.cells.push(cell);
    }
}

/// A worksheet read from a spreadsheet file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sheet {
    /// Sheet name as shown on its tab
    pub name: String,
    /// Rows in document order
    pub rows: Vec<Row>,
}

impl Sheet {
    pub fn new(name: &str) -> Self {
        Sheet {
            name: name.to_owned(),
            rows: Vec::new(),
        }
    }

    /// Rows starting at a 1-based position; positions count row elements,
    /// so 0 and 1 both start at the first row.
    pub fn rows_from(&self, start_row: usize) -> impl Iterator<Item = &Row> {
        self.rows.iter().skip(start_row.saturating_sub(1))
    }

    /// Row with the next sequential number, used when `r` is absent.
    pub(crate) fn next_row_number(&self) -> usize {
        self.rows.last().map(|row| row.number + 1).unwrap_or(1)
    }
}
