use crate::spreadsheet::range::Range;
use glob::Pattern;
use std::collections::HashSet;

/// Criteria for selecting data from a spreadsheet.
#[derive(Clone, Debug)]
pub struct Criteria {
    /// Sheet name patterns; `None` accepts every sheet.
    pub sheet_name_patterns: Option<Vec<Pattern>>,

    /// Maximum number of sheets to read.
    pub sheet_limit: Option<usize>,

    /// Data range within sheets to extract.
    pub range: Option<Range>,

    /// Cell texts read as empty (default: the empty string).
    pub nulls: HashSet<String>,

    /// Read error cells as empty instead of keeping them as error cells.
    pub error_as_null: bool,

    /// Skip rows where all columns are empty.
    pub skip_empty_rows: bool,
}

impl Default for Criteria {
    fn default() -> Self {
        Criteria {
            sheet_name_patterns: None,
            sheet_limit: None,
            range: None,
            nulls: HashSet::from([String::new()]),
            error_as_null: false,
            skip_empty_rows: true,
        }
    }
}

impl Criteria {
    /// Returns true if no patterns are specified or if the name matches any pattern.
    pub(crate) fn accept(&self, sheet_name: &str) -> bool {
        match &self.sheet_name_patterns {
            Some(patterns) => patterns.iter().any(|pattern| pattern.matches(sheet_name)),
            None => true,
        }
    }

    pub(crate) fn is_null(&self, text: &str) -> bool {
        self.nulls.contains(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_everything_without_patterns() {
        assert!(Criteria::default().accept("Sheet1"));
    }

    #[test]
    fn matches_glob_patterns() {
        let criteria = Criteria {
            sheet_name_patterns: Some(vec![Pattern::new("Orders*").unwrap()]),
            ..Criteria::default()
        };
        assert!(criteria.accept("Orders 2024"));
        assert!(!criteria.accept("Summary"));
    }

    #[test]
    fn empty_string_is_null_by_default() {
        let criteria = Criteria::default();
        assert!(criteria.is_null(""));
        assert!(!criteria.is_null("0"));
    }
}
