//! Related-record resolution
//!
//! Given records and the name of one of their foreign-key fields, fetch the
//! records they point to and key them by foreign-key value.

use crate::error::DataError;
use crate::model::record::{key_of, Record, RelatedRecordMap};
use crate::services::data_provider::{DataProvider, JsonFileProvider};
use async_trait::async_trait;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Source of related records for the export pipeline
#[async_trait]
pub trait RelatedRecordFetcher: Send + Sync {
    async fn fetch_related_records(
        &self,
        records: &[Record],
        foreign_key: &str,
        collection: &str,
    ) -> Result<RelatedRecordMap, DataError>;
}

#[async_trait]
impl RelatedRecordFetcher for JsonFileProvider {
    async fn fetch_related_records(
        &self,
        records: &[Record],
        foreign_key: &str,
        collection: &str,
    ) -> Result<RelatedRecordMap, DataError> {
        resolve_related(self, records, foreign_key, collection).await
    }
}

/// Distinct foreign-key values in first-seen order; nulls are skipped
pub fn foreign_key_values(records: &[Record], foreign_key: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(|record| record.get(foreign_key).and_then(key_of))
        .filter(|key| seen.insert(key.clone()))
        .collect()
}

/// Fetch the records referenced through `foreign_key` in one `get_many` call
///
/// The map only contains what the provider returned; callers decide what a
/// missing entry means.
pub async fn resolve_related<P: DataProvider + ?Sized>(
    provider: &P,
    records: &[Record],
    foreign_key: &str,
    collection: &str,
) -> Result<RelatedRecordMap, DataError> {
    let ids = foreign_key_values(records, foreign_key);
    if ids.is_empty() {
        return Ok(RelatedRecordMap::new());
    }

    let related = provider.get_many(collection, &ids).await?;
    let map: RelatedRecordMap = related
        .into_iter()
        .filter_map(|record| record.id_key().map(|key| (key, record)))
        .collect();

    if map.is_empty() {
        warn!(collection, requested = ids.len(), "no related records found");
    } else {
        debug!(
            collection,
            requested = ids.len(),
            resolved = map.len(),
            "resolved related records"
        );
    }
    Ok(map)
}
