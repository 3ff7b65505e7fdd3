//! Record detail dialog
//!
//! Read-only view of every field of one record, nested objects flattened to
//! dotted names.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::record::{display_value, Record};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use serde_json::{Map, Value};

/// Field name and display text pairs
pub fn flatten_fields(record: &Record) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    flatten_into(&mut fields, "", record.fields());
    fields
}

fn flatten_into(out: &mut Vec<(String, String)>, prefix: &str, map: &Map<String, Value>) {
    for (key, value) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(inner) => flatten_into(out, &name, inner),
            other => out.push((name, display_value(other))),
        }
    }
}

#[derive(Default)]
pub struct RecordDialog {
    pub scroll_offset: usize,
}

impl RecordDialog {
    pub fn draw_with_record(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        record: &Record,
        post_title: Option<&str>,
        about_label: &str,
    ) -> Result<()> {
        let fields = flatten_fields(record);
        let label_width = fields.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

        let mut lines: Vec<Line> = fields
            .into_iter()
            .map(|(name, value)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:width$}  ", name, width = label_width),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::raw(value),
                ])
            })
            .collect();

        if let Some(title) = post_title {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{} ", about_label),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    title.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }

        let popup_area = centered_popup(area, area.width.saturating_sub(8).min(90), 16);
        frame.render_widget(Clear, popup_area);

        let max_scroll = lines.len().saturating_sub(popup_area.height.saturating_sub(2) as usize);
        self.scroll_offset = self.scroll_offset.min(max_scroll);

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(format!(" Comment #{} ", record.id_label()))
                    .title_style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

impl Component for RecordDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => {
                self.scroll_offset = 0;
                Some(Action::CloseModal)
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through draw_with_record
        Ok(())
    }
}
