//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `Record` - A schemaless record and related-record lookups
//! - `ListState` - The current page and its loading status
//! - Pagination and view selection rules
//! - `ExportRow` - The fixed-column CSV projection of a comment
//! - `ModalStack` - Modal overlay management

pub mod export_row;
pub mod list_state;
pub mod modal;
pub mod pagination;
pub mod record;
pub mod view;
