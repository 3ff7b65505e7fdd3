//! Read-only data access
//!
//! `DataProvider` is the seam to the data layer. `JsonFileProvider` serves
//! each resource from `<data_dir>/<resource>.json`, a JSON array of objects.

use crate::error::DataError;
use crate::model::export_row::{POST_COLLECTION, POST_FOREIGN_KEY};
use crate::model::list_state::LoadedPage;
use crate::model::record::Record;
use crate::services::resolver::resolve_related;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Resource holding the browsed records
pub const COMMENTS_RESOURCE: &str = "comments";

/// Paging parameters for `get_list`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParams {
    /// 1-based page number
    pub page: usize,
    pub per_page: usize,
}

/// A slice of a resource plus the size of the whole resource
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListPage {
    pub data: Vec<Record>,
    pub total: usize,
}

#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetch one page of a resource
    async fn get_list(&self, resource: &str, params: ListParams) -> Result<ListPage, DataError>;

    /// Fetch the records of a resource whose ids are in `ids`
    async fn get_many(&self, resource: &str, ids: &[String]) -> Result<Vec<Record>, DataError>;
}

/// Serves resources from JSON files in a directory
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    dir: PathBuf,
}

impl JsonFileProvider {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn resource_path(&self, resource: &str) -> PathBuf {
        self.dir.join(format!("{}.json", resource))
    }

    async fn load(&self, resource: &str) -> Result<Vec<Record>, DataError> {
        let path = self.resource_path(resource);
        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| DataError::Read {
                path: path.clone(),
                source,
            })?;
        parse_records(&path, &contents)
    }
}

/// Parse a JSON array of objects into records
pub fn parse_records(path: &Path, contents: &str) -> Result<Vec<Record>, DataError> {
    let value: Value = serde_json::from_str(contents).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Array(items) = value else {
        return Err(DataError::Shape {
            path: path.to_path_buf(),
        });
    };

    items
        .into_iter()
        .map(|item| {
            Record::from_value(item).ok_or_else(|| DataError::Shape {
                path: path.to_path_buf(),
            })
        })
        .collect()
}

#[async_trait]
impl DataProvider for JsonFileProvider {
    async fn get_list(&self, resource: &str, params: ListParams) -> Result<ListPage, DataError> {
        let records = self.load(resource).await?;
        let total = records.len();
        let start = params.page.saturating_sub(1).saturating_mul(params.per_page);

        let data = records
            .into_iter()
            .skip(start)
            .take(params.per_page)
            .collect::<Vec<_>>();

        debug!(resource, page = params.page, returned = data.len(), total, "get_list");
        Ok(ListPage { data, total })
    }

    async fn get_many(&self, resource: &str, ids: &[String]) -> Result<Vec<Record>, DataError> {
        let records = self.load(resource).await?;
        let found = records
            .into_iter()
            .filter(|record| {
                record
                    .id_key()
                    .is_some_and(|id| ids.iter().any(|wanted| *wanted == id))
            })
            .collect::<Vec<_>>();

        debug!(resource, requested = ids.len(), found = found.len(), "get_many");
        Ok(found)
    }
}

/// Fetch a page of comments together with the titles of their posts
///
/// Titles that cannot be resolved are simply absent; the list still renders.
/// A failed post lookup is logged and leaves every title blank.
pub async fn load_comments_page<P: DataProvider + ?Sized>(
    provider: &P,
    params: ListParams,
) -> Result<LoadedPage, DataError> {
    let list = provider.get_list(COMMENTS_RESOURCE, params).await?;

    let post_titles = match resolve_related(provider, &list.data, POST_FOREIGN_KEY, POST_COLLECTION)
        .await
    {
        Ok(posts) => posts
            .iter()
            .map(|(key, post)| (key.clone(), post.text("title")))
            .collect(),
        Err(e) => {
            warn!(error = %e, page = params.page, "post titles unavailable");
            HashMap::new()
        }
    };

    Ok(LoadedPage {
        page: params.page,
        data: list.data,
        total: list.total,
        post_titles,
    })
}
