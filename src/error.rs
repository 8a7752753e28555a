use thiserror::Error;

/// Main error type for the crate.
/// Aggregates errors from the standard library, dependencies and internal modules.
#[derive(Error, Debug)]
pub enum RustyEtlError {
    #[error("{0}")]
    WithContextError(String),

    // Standard library errors
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    ParseIntError(#[from] std::num::ParseIntError),

    #[error("{0}")]
    ParseFloatError(#[from] std::num::ParseFloatError),

    #[error("{0}")]
    PatternError(#[from] glob::PatternError),

    // Third-party library errors
    #[error("{0}")]
    DuckDBError(#[from] duckdb::Error),

    #[error("{0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("{0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("{0}")]
    XmlEncodingError(#[from] quick_xml::encoding::EncodingError),

    #[error("{0}")]
    XmlAttributeError(#[from] quick_xml::events::attributes::AttrError),

    // Helper module errors
    #[error("{0}")]
    XmlHelperError(#[from] crate::helpers::xml::XmlError),

    // Spreadsheet module errors
    #[error("{0}")]
    SpreadsheetError(#[from] crate::spreadsheet::SpreadsheetError),

    #[error("{0}")]
    RangeError(#[from] crate::spreadsheet::range::RangeError),

    // Database module errors
    #[error("{0}")]
    DatabaseError(#[from] crate::database::DatabaseError),

    #[error("{0}")]
    ColumnError(#[from] crate::database::column::ColumnError),
}

pub(crate) trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, RustyEtlError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| RustyEtlError::WithContextError(format!("{}: {}", message, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_prefix_keeps_ok_values() {
        let result: Result<usize, RustyEtlError> = Ok(3);
        assert_eq!(result.with_prefix("orders.xlsx").unwrap(), 3);
    }

    #[test]
    fn with_prefix_prepends_message() {
        let result: Result<(), RustyEtlError> = Err(RustyEtlError::WithContextError("boom".to_owned()));
        let error = result.with_prefix("orders.xlsx").unwrap_err();
        assert_eq!(error.to_string(), "orders.xlsx: boom");
    }
}
