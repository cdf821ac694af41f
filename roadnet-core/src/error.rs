//! Error types for roadnet-core.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for roadnet-core operations.
pub type Result<T> = std::result::Result<T, RoadnetError>;

/// Errors that abort processing of the current dataset.
#[derive(Error, Debug)]
pub enum RoadnetError {
    /// A geometry feature lacks one of the expected properties.
    #[error("Feature #{feature} is missing required property '{key}'")]
    MissingProperty {
        /// Zero-based position of the feature in its source.
        feature: usize,
        /// Name of the absent property.
        key: String,
    },

    /// A geometry feature property has a value of the wrong kind.
    #[error("Feature #{feature} has invalid value for '{key}': {value}")]
    InvalidProperty {
        /// Zero-based position of the feature in its source.
        feature: usize,
        /// Name of the offending property.
        key: String,
        /// Offending value, rendered as JSON.
        value: String,
    },

    /// A table row field could not be parsed as its expected type.
    #[error("{}:{line}: column {column} value '{value}' {reason}", path.display())]
    MalformedRow {
        /// Table the row was read from.
        path: PathBuf,
        /// One-based line number of the row.
        line: u64,
        /// Zero-based column index of the field.
        column: usize,
        /// Raw field text (empty when the field is absent).
        value: String,
        /// What was expected.
        reason: String,
    },

    /// A table header does not contain a column the reader depends on.
    #[error("{}: header has no column {column}", path.display())]
    MissingColumn {
        /// Table the header was read from.
        path: PathBuf,
        /// Name or position of the missing column.
        column: String,
    },

    /// An input could not be read or an output could not be written.
    #[error("Cannot access {}: {message}", path.display())]
    FileAccess {
        /// Path that failed.
        path: PathBuf,
        /// Description of the underlying failure.
        message: String,
    },

    /// Graph document serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RoadnetError {
    /// Build a `FileAccess` error from any displayable cause.
    pub fn file_access(path: impl AsRef<Path>, cause: impl Display) -> Self {
        RoadnetError::FileAccess {
            path: path.as_ref().to_path_buf(),
            message: cause.to_string(),
        }
    }

    /// Map a `csv` crate error to the matching error kind.
    ///
    /// I/O failures become `FileAccess`; everything else (invalid UTF-8,
    /// unequal lengths) is reported as a malformed row.
    pub(crate) fn from_csv(path: &Path, err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        match err.into_kind() {
            csv::ErrorKind::Io(io) => RoadnetError::file_access(path, io),
            other => RoadnetError::MalformedRow {
                path: path.to_path_buf(),
                line,
                column: 0,
                value: String::new(),
                reason: format!("could not be decoded ({:?})", other),
            },
        }
    }
}

/// A dataset in a batch failed; the batch stops at this dataset.
#[derive(Error, Debug)]
#[error("Dataset '{dataset}' failed: {source}")]
pub struct BatchError {
    /// Name of the dataset that failed.
    pub dataset: String,
    /// The failure itself.
    #[source]
    pub source: RoadnetError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RoadnetError::MissingProperty {
            feature: 3,
            key: "oneway".to_string(),
        };
        assert!(err.to_string().contains("#3"));
        assert!(err.to_string().contains("oneway"));

        let err = RoadnetError::MalformedRow {
            path: PathBuf::from("edges.csv"),
            line: 7,
            column: 4,
            value: "abc".to_string(),
            reason: "is not an integer".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "edges.csv:7: column 4 value 'abc' is not an integer"
        );
    }

    #[test]
    fn test_batch_error_names_dataset() {
        let err = BatchError {
            dataset: "Delhi".to_string(),
            source: RoadnetError::file_access("Delhi_Links.shp", "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("Delhi"));
        assert!(msg.contains("Delhi_Links.shp"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
