//! CSV export of the visible comments
//!
//! One async operation: resolve the related posts, project every comment onto
//! the fixed export columns, encode CSV and hand the text to the downloader.

use crate::error::ExportError;
use crate::model::export_row::{
    ExportRow, MissingRelatedPolicy, EXPORT_HEADERS, POST_COLLECTION, POST_FOREIGN_KEY,
};
use crate::model::record::{Record, RelatedRecordMap};
use crate::services::download::Downloader;
use crate::services::resolver::RelatedRecordFetcher;
use std::path::PathBuf;
use tracing::{error, info};

/// Base name of the downloaded file
pub const EXPORT_BASE_NAME: &str = "comments";

/// Result of an export that did not propagate an error
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    /// The CSV was written
    Downloaded { path: PathBuf, rows: usize },
    /// Encoding failed; the error was logged and nothing was written
    Aborted { reason: String },
}

/// Project every record, in input order
pub fn build_rows(
    records: &[Record],
    related: &RelatedRecordMap,
    policy: MissingRelatedPolicy,
) -> Result<Vec<ExportRow>, ExportError> {
    records
        .iter()
        .map(|record| ExportRow::project(record, related, policy))
        .collect()
}

/// Encode rows as CSV text, header first
pub fn to_csv(rows: &[ExportRow]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADERS)?;
    for row in rows {
        writer.write_record(row.cells()?)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Export `records` as `comments.csv`
///
/// Resolution and row-construction failures propagate. Encoding failures are
/// logged and reported as [`ExportOutcome::Aborted`].
pub async fn export_dataset<F, D>(
    records: &[Record],
    fetcher: &F,
    downloader: &D,
    policy: MissingRelatedPolicy,
) -> Result<ExportOutcome, ExportError>
where
    F: RelatedRecordFetcher + ?Sized,
    D: Downloader + ?Sized,
{
    let posts = fetcher
        .fetch_related_records(records, POST_FOREIGN_KEY, POST_COLLECTION)
        .await
        .map_err(|source| ExportError::Resolve {
            collection: POST_COLLECTION.to_string(),
            source,
        })?;

    let rows = build_rows(records, &posts, policy)?;

    let csv = match to_csv(&rows) {
        Ok(csv) => csv,
        Err(e) if e.is_serialization() => {
            error!(error = %e, "CSV export aborted");
            return Ok(ExportOutcome::Aborted {
                reason: e.to_string(),
            });
        }
        Err(e) => return Err(e),
    };

    let path = downloader.download(&csv, EXPORT_BASE_NAME).await?;
    info!(rows = rows.len(), path = %path.display(), "exported comments");

    Ok(ExportOutcome::Downloaded {
        path,
        rows: rows.len(),
    })
}
