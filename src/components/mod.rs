//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod card_grid;
pub mod compact_list;
pub mod empty;
pub mod help_dialog;
pub mod layout;
pub mod list_view;
pub mod pagination;
pub mod quit_dialog;
pub mod record_dialog;

pub use help_dialog::HelpDialog;
pub use layout::{calculate_main_layout, centered_popup};
pub use list_view::{draw_list_view, ListViewComponent, ListViewContext};
pub use quit_dialog::QuitDialog;
pub use record_dialog::RecordDialog;
