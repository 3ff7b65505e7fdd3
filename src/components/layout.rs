//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen areas of the list page
pub struct MainLayout {
    pub title: Rect,
    pub body: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Areas inside the list body
pub struct ListLayout {
    pub records: Rect,
    pub pagination: Option<Rect>,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Title line, list body, status line and help line
pub fn calculate_main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    MainLayout {
        title: chunks[0],
        body: chunks[1],
        status: chunks[2],
        help: chunks[3],
    }
}

/// Split the list body, reserving a row for pagination controls when shown
pub fn calculate_list_layout(area: Rect, show_pagination: bool) -> ListLayout {
    if !show_pagination {
        return ListLayout {
            records: area,
            pagination: None,
        };
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    ListLayout {
        records: chunks[0],
        pagination: Some(chunks[1]),
    }
}

/// Cells of a card grid for items `first..first + n`, row-major
///
/// Only cards that fit entirely in `area` are returned.
pub fn grid_cells(
    area: Rect,
    columns: usize,
    card_height: u16,
    first: usize,
    count: usize,
) -> Vec<(usize, Rect)> {
    let columns = columns.max(1);
    let card_width = area.width / columns as u16;
    let visible_rows = (area.height / card_height.max(1)) as usize;

    (first..count)
        .take(visible_rows * columns)
        .map(|index| {
            let offset = index - first;
            let row = (offset / columns) as u16;
            let col = (offset % columns) as u16;
            let rect = Rect::new(
                area.x + col * card_width,
                area.y + row * card_height,
                card_width,
                card_height,
            );
            (index, rect)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_within_area() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_popup(area, 40, 10), Rect::new(30, 15, 40, 10));

        let small = Rect::new(0, 0, 20, 5);
        assert_eq!(centered_popup(small, 40, 10), Rect::new(0, 0, 20, 5));
    }

    #[test]
    fn test_list_layout_reserves_pagination_row() {
        let area = Rect::new(0, 1, 80, 20);
        let with = calculate_list_layout(area, true);
        assert_eq!(with.records.height, 19);
        assert_eq!(with.pagination, Some(Rect::new(0, 20, 80, 1)));

        let without = calculate_list_layout(area, false);
        assert_eq!(without.records, area);
        assert!(without.pagination.is_none());
    }

    #[test]
    fn test_grid_cells_row_major() {
        let area = Rect::new(0, 0, 120, 16);
        let cells = grid_cells(area, 3, 8, 0, 6);

        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], (0, Rect::new(0, 0, 40, 8)));
        assert_eq!(cells[2], (2, Rect::new(80, 0, 40, 8)));
        assert_eq!(cells[3], (3, Rect::new(0, 8, 40, 8)));
    }

    #[test]
    fn test_grid_cells_clips_to_visible_rows() {
        let area = Rect::new(0, 0, 100, 10);
        let cells = grid_cells(area, 2, 8, 2, 6);
        assert_eq!(cells.iter().map(|(i, _)| *i).collect::<Vec<_>>(), vec![2, 3]);
    }
}
