//! Empty state shown in place of the list and pagination controls

use crate::i18n::Translate;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn empty_lines(translator: &dyn Translate) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(
            translator.translate("resources.comments.empty"),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            translator.translate("resources.comments.invite"),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                " r ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Refresh"),
        ]),
    ]
}

pub fn render_empty(frame: &mut Frame, area: Rect, translator: &dyn Translate) {
    let paragraph = Paragraph::new(empty_lines(translator))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", translator.translate("ra.navigation.no_results")))
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
