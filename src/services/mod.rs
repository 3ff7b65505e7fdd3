//! External service interactions
//!
//! This module contains services for interacting with external systems:
//! - Reading comments and posts from the data directory
//! - Resolving the posts a set of comments refers to
//! - CSV export and the file download it ends with
//! - Background task execution

pub mod data_provider;
pub mod download;
pub mod export;
pub mod resolver;
pub mod task_runner;

pub use data_provider::{load_comments_page, JsonFileProvider, ListParams};
pub use download::DirectoryDownloader;
pub use export::{export_dataset, ExportOutcome};
pub use task_runner::TaskRunner;
