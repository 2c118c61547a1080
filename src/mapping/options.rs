use crate::error::SheetMapperError;
use crate::spreadsheet::Criteria;
use glob::Pattern;

/// What to do when a cell value can't be coerced to its field's type.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ConversionPolicy {
    /// Write the original value into the field unchanged
    #[default]
    Lenient,
    /// Abort the mapping call with a conversion error
    Strict,
}

/// Options of a mapping call.
#[derive(Clone, Debug, Default)]
pub struct MapperOptions {
    /// Handling of values that don't fit their field (default: lenient)
    pub conversion: ConversionPolicy,
    /// Sheet name patterns; `None` maps every sheet
    pub sheet_name_patterns: Option<Vec<Pattern>>,
}

impl MapperOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_conversion(mut self, conversion: ConversionPolicy) -> Self {
        self.conversion = conversion;
        self
    }

    /// Restricts mapping to sheets matching a glob pattern. Repeated calls
    /// accept sheets matching any of the patterns.
    pub fn with_sheet_pattern(mut self, pattern: &str) -> Result<Self, SheetMapperError> {
        let pattern = Pattern::new(pattern)?;
        self.sheet_name_patterns.get_or_insert_with(Vec::new).push(pattern);
        Ok(self)
    }

    /// Sheet selection handed to the spreadsheet reader
    pub fn criteria(&self) -> Criteria {
        Criteria {
            sheet_name_patterns: self.sheet_name_patterns.clone(),
        }
    }
}
