use crate::error::RustyEtlError;
use crate::spreadsheet::reference::col_to_index;
use crate::spreadsheet::reference::row_to_index;
use regex::Regex;
use thiserror::Error;

/// Errors related to Excel-style range parsing.
#[derive(Error, Debug)]
pub enum RangeError {
    #[error("Invalid range format '{0}'")]
    FormatError(String),
}

/// Excel-style cell range; any bound may be open.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Range {
    /// Lower row bound (0-based index), None for unbounded
    pub row_lower_bound: Option<usize>,
    /// Upper row bound (0-based index), None for unbounded
    pub row_upper_bound: Option<usize>,
    /// Lower column bound (0-based index), None for unbounded
    pub col_lower_bound: Option<usize>,
    /// Upper column bound (0-based index), None for unbounded
    pub col_upper_bound: Option<usize>,
}

impl TryFrom<&str> for Range {
    type Error = RustyEtlError;

    /// Parses "A1", "B2:C5", "A:E", "2:100" or "A2:" style ranges.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let pattern = Regex::new(r"^([A-Z]*)(\d*)(:([A-Z]*)(\d*))?$").expect("Hardcode regex pattern");
        let value = value.trim().to_ascii_uppercase();
        let captures = pattern
            .captures(value.as_str())
            .ok_or_else(|| RangeError::FormatError(value.to_owned()))?;
        let bound = |index: usize, parse: fn(&str) -> Option<usize>| {
            captures.get(index).map(|matcher| matcher.as_str()).and_then(parse)
        };
        Ok(Range {
            col_lower_bound: bound(1, col_to_index),
            row_lower_bound: bound(2, row_to_index),
            col_upper_bound: bound(4, col_to_index),
            row_upper_bound: bound(5, row_to_index),
        })
    }
}

impl std::str::FromStr for Range {
    type Err = RustyEtlError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Range::try_from(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_range() {
        let range = Range::try_from("b2:e10").unwrap();
        assert_eq!(range, Range {
            row_lower_bound: Some(1),
            row_upper_bound: Some(9),
            col_lower_bound: Some(1),
            col_upper_bound: Some(4),
        });
    }

    #[test]
    fn open_ranges() {
        let columns = Range::try_from("A:E").unwrap();
        assert_eq!(columns.row_lower_bound, None);
        assert_eq!(columns.col_upper_bound, Some(4));

        let rows = Range::try_from("2:100").unwrap();
        assert_eq!(rows.col_lower_bound, None);
        assert_eq!(rows.row_lower_bound, Some(1));
        assert_eq!(rows.row_upper_bound, Some(99));

        let start = Range::try_from("A2").unwrap();
        assert_eq!(start.row_lower_bound, Some(1));
        assert_eq!(start.row_upper_bound, None);
    }

    #[test]
    fn invalid_range() {
        assert!(Range::try_from("A1-B2").is_err());
        assert!("1A".parse::<Range>().is_err());
    }
}
