//! List view - the comment list page
//!
//! Picks the compact or full rendering from the viewport width and draws
//! pagination controls under it. List data is passed in by the app; this
//! component only owns the selection cursor.

use crate::action::Action;
use crate::component::Component;
use crate::components::card_grid::render_card_grid;
use crate::components::compact_list::render_compact_list;
use crate::components::empty::render_empty;
use crate::components::layout::calculate_list_layout;
use crate::components::pagination::render_pagination;
use crate::i18n::Translate;
use crate::model::list_state::ListState;
use crate::model::view::{select_view, Breakpoints, ViewMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{self, Block, Borders, Paragraph},
    Frame,
};

/// Selection cursor over the records of the current page
#[derive(Default)]
pub struct ListViewComponent {
    pub selection: widgets::ListState,
}

impl ListViewComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selection.selected()
    }

    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let next = match self.selection.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.selection.select(Some(next));
    }

    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let prev = match self.selection.selected() {
            Some(i) if i > 0 => i - 1,
            _ => len - 1,
        };
        self.selection.select(Some(prev));
    }

    pub fn select_first(&mut self, len: usize) {
        self.selection.select(if len == 0 { None } else { Some(0) });
    }

    pub fn select_last(&mut self, len: usize) {
        self.selection.select(len.checked_sub(1));
    }

    /// Keep the cursor inside a page that may have shrunk
    pub fn clamp(&mut self, len: usize) {
        match self.selection.selected() {
            None if len > 0 => self.selection.select(Some(0)),
            Some(i) if i >= len => self.selection.select(len.checked_sub(1)),
            _ => {}
        }
    }
}

impl Component for ListViewComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            // Records
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstItem),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastItem),
            KeyCode::Enter => Some(Action::ShowRecord),

            // Pages
            KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => Some(Action::PrevPage),
            KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => Some(Action::NextPage),
            KeyCode::Char('r') => Some(Action::Refresh),

            KeyCode::Char('x') => Some(Action::Export),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through draw_list_view which takes the list state
        Ok(())
    }
}

/// Everything the list view reads besides its own cursor
pub struct ListViewContext<'a> {
    pub list: &'a ListState,
    pub viewport_width: u16,
    pub breakpoints: &'a Breakpoints,
    pub translator: &'a dyn Translate,
}

impl ListViewContext<'_> {
    pub fn view_mode(&self) -> ViewMode {
        select_view(self.viewport_width, self.breakpoints.medium)
    }
}

pub fn draw_list_view(
    frame: &mut Frame,
    area: Rect,
    view: &mut ListViewComponent,
    ctx: &ListViewContext,
) {
    let visibility = ctx.list.visibility();

    if visibility.show_empty {
        render_empty(frame, area, ctx.translator);
        return;
    }

    if ctx.list.data.is_empty() {
        render_loading(frame, area, ctx.translator);
        return;
    }

    let layout = calculate_list_layout(area, visibility.show_controls());
    let title = list_title(ctx);

    match ctx.view_mode() {
        ViewMode::Compact => render_compact_list(
            frame,
            layout.records,
            &ctx.list.data,
            &mut view.selection,
            &title,
            ctx.translator,
        ),
        ViewMode::Full => {
            let block = Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title))
                .border_style(Style::default().fg(Color::DarkGray));
            let inner = block.inner(layout.records);
            frame.render_widget(block, layout.records);
            render_card_grid(
                frame,
                inner,
                ctx.list,
                view.selected(),
                ctx.breakpoints,
                ctx.translator,
            );
        }
    }

    if let Some(pagination_area) = layout.pagination {
        render_pagination(
            frame,
            pagination_area,
            &visibility,
            ctx.list.page,
            ctx.translator,
        );
    }
}

fn list_title(ctx: &ListViewContext) -> String {
    let mut title = format!(
        "{} ({})",
        ctx.translator.translate("resources.comments.name"),
        ctx.list.total
    );
    if ctx.list.is_loading {
        title = format!("{} {}", title, ctx.translator.translate("ra.page.loading"));
    }
    title
}

fn render_loading(frame: &mut Frame, area: Rect, translator: &dyn Translate) {
    let paragraph = Paragraph::new(translator.translate("ra.page.loading"))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}
