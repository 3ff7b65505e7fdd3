//! Full rendering: a grid of cards, one per record

use crate::components::layout::grid_cells;
use crate::i18n::Translate;
use crate::model::list_state::ListState;
use crate::model::record::Record;
use crate::model::view::Breakpoints;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub const CARD_HEIGHT: u16 = 8;

/// Two columns on medium terminals, three on large ones
pub fn grid_columns(width: u16, breakpoints: &Breakpoints) -> usize {
    if width >= breakpoints.large {
        3
    } else {
        2
    }
}

/// Index of the first card to draw so that `selected` stays on screen
pub fn first_visible(selected: usize, columns: usize, visible_rows: usize) -> usize {
    let columns = columns.max(1);
    let visible_rows = visible_rows.max(1);
    let selected_row = selected / columns;
    let first_row = (selected_row + 1).saturating_sub(visible_rows);
    first_row * columns
}

fn card_lines(record: &Record, list: &ListState, translator: &dyn Translate) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                record.text("author.name"),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", translator.format_date(&record.text("created_at"))),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(""),
        Line::from(record.text("body")),
    ];

    if let Some(title) = list.post_title(record) {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", translator.translate("comment.list.about")),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(title.to_string(), Style::default().fg(Color::Cyan)),
        ]));
    }

    lines
}

pub fn render_card_grid(
    frame: &mut Frame,
    area: Rect,
    list: &ListState,
    selected: Option<usize>,
    breakpoints: &Breakpoints,
    translator: &dyn Translate,
) {
    let columns = grid_columns(area.width, breakpoints);
    let visible_rows = (area.height / CARD_HEIGHT) as usize;
    let first = first_visible(selected.unwrap_or(0), columns, visible_rows);
    let show_label = translator.translate("ra.action.show");

    for (index, cell) in grid_cells(area, columns, CARD_HEIGHT, first, list.data.len()) {
        let record = &list.data[index];
        let is_selected = selected == Some(index);
        let border_style = if is_selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" #{} ", record.id_label()));
        if is_selected {
            block = block
                .title_bottom(Line::from(format!(" Enter {} ", show_label)))
                .title_style(Style::default().add_modifier(Modifier::BOLD));
        }

        let paragraph = Paragraph::new(card_lines(record, list, translator))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_columns() {
        let breakpoints = Breakpoints::default();
        assert_eq!(grid_columns(100, &breakpoints), 2);
        assert_eq!(grid_columns(149, &breakpoints), 2);
        assert_eq!(grid_columns(150, &breakpoints), 3);
    }

    #[test]
    fn test_first_visible_keeps_selection_on_screen() {
        assert_eq!(first_visible(0, 3, 2), 0);
        assert_eq!(first_visible(5, 3, 2), 0);
        assert_eq!(first_visible(6, 3, 2), 3);
        assert_eq!(first_visible(5, 2, 1), 4);
        assert_eq!(first_visible(3, 2, 0), 2);
    }
}
