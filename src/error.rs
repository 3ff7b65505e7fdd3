//! Typed errors for the data layer and the CSV export pipeline
//!
//! The rest of the application works with `anyhow::Result`; these enums exist
//! where callers need to tell failure kinds apart.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the JSON-file data provider
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} does not contain a JSON array of objects", .path.display())]
    Shape { path: PathBuf },
}

/// Failures of the export pipeline
///
/// Serialization failures ([`ExportError::is_serialization`]) are swallowed by
/// the pipeline: they are logged and the download is suppressed. Every other
/// variant propagates to the caller.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to fetch related {collection}: {source}")]
    Resolve {
        collection: String,
        #[source]
        source: DataError,
    },

    #[error("comment {record_id} references {foreign_key}={key} but no such record was fetched")]
    MissingRelated {
        record_id: String,
        foreign_key: String,
        key: String,
    },

    #[error("comment {record_id} has no `{field}` object")]
    MissingField { record_id: String, field: String },

    #[error("column `{column}` of comment {record_id} holds a nested value")]
    NonScalar {
        record_id: String,
        column: &'static str,
    },

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("failed to write {}: {source}", .path.display())]
    Download {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExportError {
    /// Whether this error happened while encoding rows as CSV text
    pub fn is_serialization(&self) -> bool {
        matches!(
            self,
            ExportError::NonScalar { .. } | ExportError::Csv(_) | ExportError::Encoding(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_classification() {
        let non_scalar = ExportError::NonScalar {
            record_id: "1".to_string(),
            column: "body",
        };
        assert!(non_scalar.is_serialization());

        let missing = ExportError::MissingRelated {
            record_id: "1".to_string(),
            foreign_key: "post_id".to_string(),
            key: "10".to_string(),
        };
        assert!(!missing.is_serialization());
        assert_eq!(
            missing.to_string(),
            "comment 1 references post_id=10 but no such record was fetched"
        );
    }
}
