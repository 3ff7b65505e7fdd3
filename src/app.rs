//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components. It owns
//! the list state and the background tasks that fill it.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_main_layout, draw_list_view, HelpDialog, ListViewComponent, ListViewContext,
    QuitDialog, RecordDialog,
};
use crate::config::Config;
use crate::error::{DataError, ExportError};
use crate::i18n::{Translate, Translator};
use crate::model::list_state::{ListState, LoadedPage};
use crate::model::modal::{Modal, ModalStack};
use crate::model::pagination::{request_page, PageDirection, PaginationState};
use crate::model::view::select_view;
use crate::services::{
    export_dataset, load_comments_page, DirectoryDownloader, ExportOutcome, JsonFileProvider,
    ListParams, TaskRunner,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::{debug, error, info, warn};

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    pub config: Config,

    /// Runtime for page loads and exports
    runtime: Runtime,

    provider: Arc<JsonFileProvider>,
    downloader: Arc<DirectoryDownloader>,
    pub translator: Translator,

    /// Current page of comments
    pub list: ListState,

    /// Background page fetch; a newer request supersedes an older one
    page_loader: TaskRunner<Result<LoadedPage, DataError>>,

    /// Background export; a new export supersedes a running one
    exporter: TaskRunner<Result<ExportOutcome, ExportError>>,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    /// Last known terminal width; selects the list view
    pub viewport_width: u16,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub list_view: ListViewComponent,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
    pub record_dialog: RecordDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Create a new App instance from a loaded config
    pub fn new(config: Config) -> Result<App> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("comments-tui-worker")
            .enable_all()
            .build()?;

        info!(
            data_dir = %config.data_dir,
            download_dir = %config.download_dir,
            per_page = config.per_page,
            "starting comment list"
        );

        Ok(App {
            runtime,
            provider: Arc::new(JsonFileProvider::new(&config.data_dir)),
            downloader: Arc::new(DirectoryDownloader::new(&config.download_dir)),
            translator: Translator::new(config.locale),
            list: ListState::new(config.per_page),
            page_loader: TaskRunner::new("page_loader"),
            exporter: TaskRunner::new("exporter"),
            modals: ModalStack::new(),
            should_quit: false,
            error: None,
            status_message: None,
            viewport_width: 0,
            list_view: ListViewComponent::new(),
            quit_dialog: QuitDialog::default(),
            help_dialog: HelpDialog::default(),
            record_dialog: RecordDialog::default(),
            config,
        })
    }

    pub fn is_exporting(&self) -> bool {
        self.exporter.is_running()
    }

    /// Start fetching `page`; the current rows stay visible until it lands
    fn load_page(&mut self, page: usize) {
        let params = ListParams {
            page,
            per_page: self.list.per_page,
        };
        debug!(page, "loading page");

        self.list.begin_loading(page);
        let provider = Arc::clone(&self.provider);
        self.page_loader.spawn(self.runtime.handle(), async move {
            load_comments_page(provider.as_ref(), params).await
        });
    }

    /// Export the rows currently shown
    fn start_export(&mut self) {
        let records = self.list.data.clone();
        let fetcher = Arc::clone(&self.provider);
        let downloader = Arc::clone(&self.downloader);
        let policy = self.config.missing_related;

        info!(rows = records.len(), page = self.list.page, "starting export");
        self.error = None;
        self.status_message = Some(format!("Exporting {} comments...", records.len()));

        self.exporter.spawn(self.runtime.handle(), async move {
            export_dataset(&records, fetcher.as_ref(), downloader.as_ref(), policy).await
        });
    }

    /// Collect results of finished background tasks
    fn poll_tasks(&mut self) {
        if let Some(result) = self.page_loader.poll() {
            match result {
                Ok(loaded) if loaded.page > 1 && loaded.data.is_empty() && loaded.total > 0 => {
                    // The collection shrank under the current page
                    let last = PaginationState::new(loaded.page, self.list.per_page, loaded.total)
                        .page_count();
                    let target = if last < loaded.page { last } else { 1 };
                    warn!(page = loaded.page, total = loaded.total, target, "page out of range");
                    self.list_view.select_first(0);
                    self.load_page(target);
                }
                Ok(loaded) => {
                    info!(
                        page = loaded.page,
                        rows = loaded.data.len(),
                        total = loaded.total,
                        "page loaded"
                    );
                    self.list.apply(loaded);
                    self.list_view.clamp(self.list.data.len());
                    self.error = None;
                }
                Err(e) => {
                    error!(error = %e, "failed to load comments");
                    self.list.fail_loading();
                    self.error = Some(e.to_string());
                }
            }
        }

        if let Some(result) = self.exporter.poll() {
            match result {
                Ok(ExportOutcome::Downloaded { path, rows }) => {
                    self.status_message =
                        Some(format!("Exported {} comments to {}", rows, path.display()));
                }
                Ok(ExportOutcome::Aborted { .. }) => {
                    // Already logged by the export; nothing is surfaced
                    self.status_message = None;
                }
                Err(e) => {
                    error!(error = %e, "export failed");
                    self.status_message = None;
                    self.error = Some(format!("Export failed: {}", e));
                }
            }
        }
    }

    /// Abort background work before leaving
    fn shutdown(&mut self) {
        if self.exporter.abort() {
            warn!("export aborted on quit");
        }
        self.page_loader.abort();
        self.modals.clear();
        self.should_quit = true;
    }

    fn resize(&mut self, width: u16) {
        let breakpoints = self.config.breakpoints;
        if breakpoints.is_small(self.viewport_width) != breakpoints.is_small(width)
            || self.viewport_width == 0
        {
            let view = select_view(width, breakpoints.medium);
            info!(view = view.name(), width, "view selected");
        }
        self.viewport_width = width;
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.load_page(1);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }

        if let Some(modal) = self.modals.top().cloned() {
            return self.handle_modal_key_event(&modal, key);
        }

        // Esc dismisses the message line
        if key.code == KeyCode::Esc && (self.error.is_some() || self.status_message.is_some()) {
            self.error = None;
            self.status_message = None;
            return Ok(None);
        }

        self.list_view.handle_key_event(key)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let len = self.list.data.len();

        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => self.poll_tasks(),
            Action::Resize(width, _) => self.resize(width),
            Action::ForceQuit => self.shutdown(),

            // ─────────────────────────────────────────────────────────────────
            // Navigation (delegate to ListViewComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::NextItem => self.list_view.next(len),
            Action::PrevItem => self.list_view.previous(len),
            Action::FirstItem => self.list_view.select_first(len),
            Action::LastItem => self.list_view.select_last(len),

            // ─────────────────────────────────────────────────────────────────
            // Pagination
            // ─────────────────────────────────────────────────────────────────
            Action::PrevPage => {
                let page = request_page(&self.list.visibility(), self.list.page, PageDirection::Prev);
                return Ok(page.map(Action::SetPage));
            }
            Action::NextPage => {
                let page = request_page(&self.list.visibility(), self.list.page, PageDirection::Next);
                return Ok(page.map(Action::SetPage));
            }
            Action::SetPage(page) => {
                self.list_view.select_first(0);
                self.load_page(page);
            }
            Action::Refresh => self.load_page(self.list.page),

            // ─────────────────────────────────────────────────────────────────
            // Export
            // ─────────────────────────────────────────────────────────────────
            Action::Export => self.start_export(),

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::ShowRecord => {
                if let Some(index) = self.list_view.selected().filter(|i| *i < len) {
                    self.record_dialog.scroll_offset = 0;
                    self.modals.push(Modal::RecordDetail { index });
                }
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::OpenQuitDialog => {
                self.quit_dialog.export_running = self.is_exporting();
                self.modals.push(Modal::QuitConfirm);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        if self.viewport_width != area.width {
            self.resize(area.width);
        }
        let layout = calculate_main_layout(area);

        self.render_title_bar(frame, layout.title);

        let ctx = ListViewContext {
            list: &self.list,
            viewport_width: self.viewport_width,
            breakpoints: &self.config.breakpoints,
            translator: &self.translator,
        };
        draw_list_view(frame, layout.body, &mut self.list_view, &ctx);

        self.render_status_bar(frame, layout.status);
        render_help_bar(frame, layout.help);

        // Draw modal overlay if active
        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
            Modal::RecordDetail { .. } => self.record_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::Help => self.help_dialog.draw(frame, area)?,
            Modal::RecordDetail { index } => {
                if let Some(record) = self.list.data.get(*index) {
                    let about = self.translator.translate("comment.list.about");
                    self.record_dialog.draw_with_record(
                        frame,
                        area,
                        record,
                        self.list.post_title(record),
                        &about,
                    )?;
                }
            }
        }
        Ok(())
    }

    fn render_title_bar(&self, frame: &mut Frame, area: Rect) {
        let view = select_view(self.viewport_width, self.config.breakpoints.medium);
        let spans = vec![
            Span::styled(
                format!(" {} ", self.translator.translate("resources.comments.name")),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                format!(" {} ", view.name()),
                Style::default().fg(Color::Black).bg(Color::Magenta),
            ),
            Span::styled(
                format!("  {}", self.config.data_dir),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![];

        if let Some(elapsed) = self.exporter.elapsed() {
            spans.push(Span::styled(
                format!(
                    " {} {:.1}s ",
                    self.translator.translate("ra.action.export"),
                    elapsed.as_secs_f32()
                ),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        if let Some(error) = &self.error {
            spans.push(Span::styled(
                format!(" Error: {} ", error),
                Style::default().fg(Color::Red),
            ));
        } else if let Some(status) = &self.status_message {
            spans.push(Span::styled(
                format!(" {} ", status),
                Style::default().fg(Color::Yellow),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn render_help_bar(frame: &mut Frame, area: Rect) {
    let key = |k: &'static str, color: Color| {
        Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };

    let help_spans = vec![
        key(" q ", Color::Yellow),
        Span::raw("Quit "),
        key(" ←/→ ", Color::Cyan),
        Span::raw("Page "),
        key(" j/k ", Color::Cyan),
        Span::raw("Select "),
        key(" Enter ", Color::Green),
        Span::raw("Show "),
        key(" x ", Color::Green),
        Span::raw("Export "),
        key(" r ", Color::Cyan),
        Span::raw("Refresh "),
        key(" ? ", Color::White),
        Span::raw("Help"),
    ];

    let paragraph = Paragraph::new(Line::from(help_spans))
        .alignment(ratatui::layout::Alignment::Left);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::export_row::MissingRelatedPolicy;
    use crate::model::view::Breakpoints;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use serde_json::json;
    use std::fs;
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;

    struct Fixture {
        _data: TempDir,
        downloads: TempDir,
        app: App,
    }

    fn fixture(comment_count: i64, post_ids: &[i64]) -> Fixture {
        fixture_with(comment_count, Some(post_ids))
    }

    /// Without `post_ids` no `posts.json` is written
    fn fixture_with(comment_count: i64, post_ids: Option<&[i64]>) -> Fixture {
        let data = TempDir::new().unwrap();
        let downloads = TempDir::new().unwrap();

        let comments: Vec<_> = (1..=comment_count)
            .map(|id| {
                json!({
                    "id": id,
                    "author": { "name": format!("Author {}", id) },
                    "post_id": 1 + (id % 2),
                    "created_at": "2024-01-05",
                    "body": format!("Comment {}", id),
                })
            })
            .collect();
        fs::write(data.path().join("comments.json"), json!(comments).to_string()).unwrap();
        if let Some(post_ids) = post_ids {
            let posts: Vec<_> = post_ids
                .iter()
                .map(|id| json!({ "id": id, "title": format!("Post {}", id) }))
                .collect();
            fs::write(data.path().join("posts.json"), json!(posts).to_string()).unwrap();
        }

        let config = Config {
            data_dir: data.path().to_string_lossy().to_string(),
            download_dir: downloads.path().to_string_lossy().to_string(),
            per_page: 6,
            breakpoints: Breakpoints::default(),
            locale: Default::default(),
            missing_related: MissingRelatedPolicy::Abort,
        };
        let mut app = App::new(config).unwrap();
        app.init().unwrap();

        Fixture {
            _data: data,
            downloads,
            app,
        }
    }

    /// Tick until `done` holds
    fn tick_until(app: &mut App, done: impl Fn(&App) -> bool) {
        for _ in 0..300 {
            app.update(Action::Tick).unwrap();
            if done(app) {
                return;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("background task did not finish");
    }

    /// Run an action and its follow-ups, as the main loop does
    fn dispatch(app: &mut App, action: Action) {
        let mut current = Some(action);
        while let Some(a) = current {
            current = app.update(a).unwrap();
        }
    }

    #[test]
    fn test_init_loads_first_page() {
        let mut f = fixture(8, &[1, 2]);
        tick_until(&mut f.app, |app| !app.list.is_loading);

        assert_eq!(f.app.list.page, 1);
        assert_eq!(f.app.list.data.len(), 6);
        assert_eq!(f.app.list.total, 8);
        assert_eq!(f.app.list.post_title(&f.app.list.data[0]), Some("Post 2"));
        assert_eq!(f.app.list_view.selected(), Some(0));
    }

    #[test]
    fn test_page_navigation_follows_visibility() {
        let mut f = fixture(8, &[1, 2]);
        tick_until(&mut f.app, |app| !app.list.is_loading);

        // Prev is hidden on the first page
        assert_eq!(f.app.update(Action::PrevPage).unwrap(), None);

        assert_eq!(f.app.update(Action::NextPage).unwrap(), Some(Action::SetPage(2)));
        dispatch(&mut f.app, Action::SetPage(2));
        tick_until(&mut f.app, |app| !app.list.is_loading);

        assert_eq!(f.app.list.page, 2);
        assert_eq!(f.app.list.data.len(), 2);
        // Next is hidden on the last page
        assert_eq!(f.app.update(Action::NextPage).unwrap(), None);
    }

    #[test]
    fn test_empty_collection_has_no_page_requests() {
        let mut f = fixture(0, &[]);
        tick_until(&mut f.app, |app| !app.list.is_loading);

        assert!(f.app.list.visibility().show_empty);
        assert_eq!(f.app.update(Action::NextPage).unwrap(), None);
        assert_eq!(f.app.update(Action::PrevPage).unwrap(), None);
    }

    #[test]
    fn test_load_failure_is_reported() {
        let mut f = fixture(3, &[1, 2]);
        tick_until(&mut f.app, |app| !app.list.is_loading);

        fs::write(
            std::path::Path::new(&f.app.config.data_dir).join("comments.json"),
            "{ broken",
        )
        .unwrap();
        dispatch(&mut f.app, Action::Refresh);
        tick_until(&mut f.app, |app| !app.list.is_loading);

        assert!(f.app.error.is_some());
        assert_eq!(f.app.list.data.len(), 3);
    }

    #[test]
    fn test_export_writes_csv() {
        let mut f = fixture(3, &[1, 2]);
        tick_until(&mut f.app, |app| !app.list.is_loading);

        dispatch(&mut f.app, Action::Export);
        assert!(f.app.is_exporting());
        tick_until(&mut f.app, |app| !app.is_exporting());

        let csv = fs::read_to_string(f.downloads.path().join("comments.csv")).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("id,author_name,post_id,post_title,created_at,body"));
        assert_eq!(lines.next(), Some("1,Author 1,2,Post 2,2024-01-05,Comment 1"));
        assert_eq!(csv.lines().count(), 4);
        assert!(f.app.status_message.as_deref().unwrap().starts_with("Exported 3 comments"));
        assert!(f.app.error.is_none());
    }

    #[test]
    fn test_export_with_missing_post_fails() {
        let mut f = fixture(3, &[1]);
        tick_until(&mut f.app, |app| !app.list.is_loading);

        dispatch(&mut f.app, Action::Export);
        tick_until(&mut f.app, |app| !app.is_exporting());

        assert!(f.app.error.as_deref().unwrap().starts_with("Export failed"));
        assert!(!f.downloads.path().join("comments.csv").exists());
    }

    #[test]
    fn test_show_record_and_close() {
        let mut f = fixture(3, &[1, 2]);
        tick_until(&mut f.app, |app| !app.list.is_loading);

        dispatch(&mut f.app, Action::LastItem);
        dispatch(&mut f.app, Action::ShowRecord);
        assert_eq!(f.app.modals.top(), Some(&Modal::RecordDetail { index: 2 }));

        dispatch(&mut f.app, Action::CloseModal);
        assert_eq!(f.app.modals.top(), None);
    }

    #[test]
    fn test_quit_aborts_running_export() {
        let mut f = fixture(3, &[1, 2]);
        tick_until(&mut f.app, |app| !app.list.is_loading);

        dispatch(&mut f.app, Action::Export);
        dispatch(&mut f.app, Action::OpenQuitDialog);
        assert_eq!(f.app.modals.top(), Some(&Modal::QuitConfirm));

        dispatch(&mut f.app, Action::ForceQuit);
        assert!(f.app.should_quit);
        assert!(!f.app.is_exporting());
    }

    #[test]
    fn test_resize_tracks_viewport() {
        let mut f = fixture(1, &[2]);
        dispatch(&mut f.app, Action::Resize(80, 24));
        assert_eq!(f.app.viewport_width, 80);
        dispatch(&mut f.app, Action::Resize(160, 40));
        assert_eq!(f.app.viewport_width, 160);
    }

    #[test]
    fn test_list_renders_without_posts() {
        let mut f = fixture_with(3, None);
        tick_until(&mut f.app, |app| !app.list.is_loading);

        assert_eq!(f.app.list.data.len(), 3);
        assert_eq!(f.app.list.total, 3);
        assert_eq!(f.app.list.post_title(&f.app.list.data[0]), None);
        assert!(f.app.error.is_none());
    }

    #[test]
    fn test_export_without_posts_still_fails() {
        let mut f = fixture_with(3, None);
        tick_until(&mut f.app, |app| !app.list.is_loading);

        dispatch(&mut f.app, Action::Export);
        tick_until(&mut f.app, |app| !app.is_exporting());

        assert!(f.app.error.as_deref().unwrap().starts_with("Export failed"));
        assert!(!f.downloads.path().join("comments.csv").exists());
    }

    #[test]
    fn test_refresh_past_shrunken_collection_moves_to_last_page() {
        let mut f = fixture(8, &[1, 2]);
        tick_until(&mut f.app, |app| !app.list.is_loading);
        dispatch(&mut f.app, Action::NextPage);
        tick_until(&mut f.app, |app| !app.list.is_loading);
        assert_eq!(f.app.list.page, 2);

        let comments: Vec<_> = (1..=3)
            .map(|id| json!({ "id": id, "author": { "name": "A" }, "post_id": 1 }))
            .collect();
        fs::write(
            std::path::Path::new(&f.app.config.data_dir).join("comments.json"),
            json!(comments).to_string(),
        )
        .unwrap();
        dispatch(&mut f.app, Action::Refresh);
        tick_until(&mut f.app, |app| !app.list.is_loading);

        assert_eq!(f.app.list.page, 1);
        assert_eq!(f.app.list.total, 3);
        assert_eq!(f.app.list.data.len(), 3);
        assert!(!f.app.list.visibility().show_empty);
    }

    #[test]
    fn test_view_follows_viewport_width() {
        let mut f = fixture(3, &[1, 2]);
        tick_until(&mut f.app, |app| !app.list.is_loading);

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| f.app.draw(frame, frame.area()).unwrap()).unwrap();
        assert_eq!(f.app.viewport_width, 120);

        dispatch(&mut f.app, Action::Resize(60, 30));
        assert_eq!(f.app.viewport_width, 60);
    }
}
