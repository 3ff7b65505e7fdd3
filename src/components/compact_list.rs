//! Compact rendering: one entry per record, for narrow terminals

use crate::i18n::Translate;
use crate::model::record::Record;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const PERSON_ICON: &str = "◉";

/// Primary, secondary and tertiary text of one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactItemText {
    pub primary: String,
    pub secondary: String,
    pub tertiary: String,
}

pub fn compact_item_text(record: &Record, translator: &dyn Translate) -> CompactItemText {
    CompactItemText {
        primary: record.text("author.name"),
        secondary: record.text("body"),
        tertiary: translator.format_date(&record.text("created_at")),
    }
}

/// Collapse `text` to a single line no wider than `max_width` columns
pub fn fit_to_width(text: &str, max_width: usize) -> String {
    let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.width() <= max_width {
        return line;
    }

    let budget = max_width.saturating_sub(1);
    let mut used = 0;
    let mut fitted = String::new();
    for c in line.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        fitted.push(c);
    }
    if max_width > 0 {
        fitted.push('…');
    }
    fitted
}

fn compact_item(text: CompactItemText, width: usize) -> ListItem<'static> {
    ListItem::new(vec![
        Line::from(vec![
            Span::styled(format!("{} ", PERSON_ICON), Style::default().fg(Color::Yellow)),
            Span::styled(
                text.primary,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", text.tertiary),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(Span::styled(
            format!("  {}", fit_to_width(&text.secondary, width.saturating_sub(2))),
            Style::default().fg(Color::Gray),
        )),
    ])
}

pub fn render_compact_list(
    frame: &mut Frame,
    area: Rect,
    records: &[Record],
    list_state: &mut ListState,
    title: &str,
    translator: &dyn Translate,
) {
    // Borders and highlight symbol
    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = records
        .iter()
        .map(|record| compact_item(compact_item_text(record, translator), width))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title))
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, list_state);
}
