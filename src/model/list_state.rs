//! List state owned by the app and passed explicitly to the list view

use super::pagination::{compute_visibility, PaginationState, PaginationVisibility};
use super::record::Record;
use std::collections::HashMap;

/// One fetched page of comments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedPage {
    pub page: usize,
    pub data: Vec<Record>,
    pub total: usize,
    /// Post titles for the posts referenced on this page, keyed by post id
    pub post_titles: HashMap<String, String>,
}

/// The current page of records and its loading status
#[derive(Debug, Clone)]
pub struct ListState {
    pub data: Vec<Record>,
    pub is_loading: bool,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub post_titles: HashMap<String, String>,
    /// Page the current `data` belongs to
    loaded_page: usize,
}

impl ListState {
    pub fn new(per_page: usize) -> Self {
        Self {
            data: Vec::new(),
            is_loading: true,
            page: 1,
            per_page,
            total: 0,
            post_titles: HashMap::new(),
            loaded_page: 1,
        }
    }

    pub fn pagination(&self) -> PaginationState {
        PaginationState::new(self.page, self.per_page, self.total)
    }

    pub fn visibility(&self) -> PaginationVisibility {
        compute_visibility(&self.pagination(), self.is_loading, !self.data.is_empty())
    }

    /// Mark a fetch of `page` as in flight; current data stays visible
    pub fn begin_loading(&mut self, page: usize) {
        self.page = page;
        self.is_loading = true;
    }

    pub fn apply(&mut self, loaded: LoadedPage) {
        self.page = loaded.page;
        self.loaded_page = loaded.page;
        self.data = loaded.data;
        self.total = loaded.total;
        self.post_titles = loaded.post_titles;
        self.is_loading = false;
    }

    /// A failed fetch keeps whatever was shown before, page number included
    pub fn fail_loading(&mut self) {
        self.page = self.loaded_page;
        self.is_loading = false;
    }

    /// Title of the post a comment is about, if it was fetched
    pub fn post_title(&self, record: &Record) -> Option<&str> {
        let key = record.get("post_id").and_then(super::record::key_of)?;
        self.post_titles.get(&key).map(String::as_str)
    }
}
