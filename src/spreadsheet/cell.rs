use crate::spreadsheet::reference::column_letters;
use crate::spreadsheet::SpreadsheetError;

/// Types of cell payload, taken from the `t` attribute of a worksheet cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CellType {
    /// Numeric values (no `t` attribute, or `t="n"`)
    #[default]
    Number,
    /// Boolean values stored as `0`/`1`
    Boolean,
    /// Error values such as `#DIV/0!`
    Error,
    /// ISO 8601 date/time strings
    IsoDateTime,
    /// Inline strings and formula string results
    InlineString,
    /// Shared string table references
    SharedString,
}

impl CellType {
    /// Maps the `t` attribute of a `<c>` element to a cell type.
    pub(crate) fn parse(kind: Option<&str>) -> Self {
        match kind {
            Some("inlineStr") | Some("str") => CellType::InlineString,
            Some("s") => CellType::SharedString,
            Some("d") => CellType::IsoDateTime,
            Some("b") => CellType::Boolean,
            Some("e") => CellType::Error,
            _ => CellType::Number,
        }
    }
}

/// A single worksheet cell with its raw payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// A1-style position, e.g. "C7"
    pub reference: String,
    /// Cell payload type
    pub kind: CellType,
    /// Raw text; a table index when `kind` is `SharedString`
    pub value: String,
}

impl Cell {
    pub fn new(reference: &str, kind: CellType, value: &str) -> Self {
        Cell {
            reference: reference.to_owned(),
            kind,
            value: value.to_owned(),
        }
    }

    /// Column letters of the reference ("C7" -> "C").
    pub fn column(&self) -> String {
        column_letters(&self.reference)
    }

    pub fn is_shared_string(&self) -> bool {
        self.kind == CellType::SharedString
    }

    /// Parses the payload of a shared-string cell as a table index.
    pub fn shared_string_index(&self) -> Result<usize, SpreadsheetError> {
        self.value
            .trim()
            .parse::<usize>()
            .map_err(|_| SpreadsheetError::SharedStringIndexError(self.value.to_owned()))
    }
}
