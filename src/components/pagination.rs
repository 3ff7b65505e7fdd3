//! Pagination controls rendered under the record list

use crate::i18n::Translate;
use crate::model::pagination::PaginationVisibility;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Build the control line: prev, page info, next
///
/// Hidden controls leave no placeholder.
pub fn pagination_line(
    visibility: &PaginationVisibility,
    page: usize,
    translator: &dyn Translate,
) -> Line<'static> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();

    if visibility.show_prev {
        spans.push(Span::styled(" ◀ ", key_style));
        spans.push(Span::raw(translator.translate("ra.navigation.prev")));
        spans.push(Span::raw("  "));
    }

    spans.push(Span::styled(
        translator.translate_with(
            "ra.navigation.page_info",
            &[
                ("page", page.to_string()),
                ("count", visibility.page_count.to_string()),
            ],
        ),
        Style::default().fg(Color::DarkGray),
    ));

    if visibility.show_next {
        spans.push(Span::raw("  "));
        spans.push(Span::raw(translator.translate("ra.navigation.next")));
        spans.push(Span::styled(" ▶ ", key_style));
    }

    Line::from(spans)
}

pub fn render_pagination(
    frame: &mut Frame,
    area: Rect,
    visibility: &PaginationVisibility,
    page: usize,
    translator: &dyn Translate,
) {
    let paragraph =
        Paragraph::new(pagination_line(visibility, page, translator)).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Locale, Translator};

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn visibility(show_prev: bool, show_next: bool, page_count: usize) -> PaginationVisibility {
        PaginationVisibility {
            show_empty: false,
            show_prev,
            show_next,
            page_count,
        }
    }

    #[test]
    fn test_middle_page_shows_both_controls() {
        let translator = Translator::new(Locale::En);
        let line = pagination_line(&visibility(true, true, 5), 2, &translator);
        assert_eq!(text(&line), " ◀ Prev  Page 2 of 5  Next ▶ ");
    }

    #[test]
    fn test_first_page_hides_prev() {
        let translator = Translator::new(Locale::En);
        let line = pagination_line(&visibility(false, true, 5), 1, &translator);
        let rendered = text(&line);
        assert!(!rendered.contains("Prev"));
        assert!(rendered.starts_with("Page 1 of 5"));
    }

    #[test]
    fn test_last_page_hides_next() {
        let translator = Translator::new(Locale::Fr);
        let line = pagination_line(&visibility(true, false, 3), 3, &translator);
        let rendered = text(&line);
        assert!(rendered.contains("Précédent"));
        assert!(!rendered.contains("Suivant"));
        assert!(rendered.ends_with("Page 3 sur 3"));
    }
}
