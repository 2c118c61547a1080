use glob::Pattern;

/// Criteria for selecting which worksheets to read.
#[derive(Clone, Debug, Default)]
pub struct Criteria {
    /// Sheet name patterns; `None` selects every sheet.
    pub sheet_name_patterns: Option<Vec<Pattern>>,
}

impl Criteria {
    /// Checks if a sheet name matches the criteria patterns.
    /// Returns true if no patterns are specified or if name matches any pattern.
    pub fn accept(&self, sheet_name: &str) -> bool {
        match &self.sheet_name_patterns {
            Some(patterns) => patterns.iter().any(|pattern| pattern.matches(sheet_name)),
            None => true,
        }
    }
}
