//! Pagination state and control visibility
//!
//! The controller never mutates the list state. It derives which controls are
//! visible and turns a prev/next press into a page request that the list-state
//! owner fulfils by refetching.

/// Raw pagination numbers supplied by the list-state owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    /// Current page, 1-based
    pub page: usize,
    /// Records per page, expected to be > 0
    pub per_page: usize,
    /// Total number of records across all pages
    pub total: usize,
}

impl PaginationState {
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        Self {
            page,
            per_page,
            total,
        }
    }

    /// `max(1, ceil(total / per_page))`
    pub fn page_count(&self) -> usize {
        if self.per_page == 0 {
            return 1;
        }
        self.total.div_ceil(self.per_page).max(1)
    }
}

/// Which pagination elements should be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaginationVisibility {
    /// Render the empty state instead of any navigation
    pub show_empty: bool,
    pub show_prev: bool,
    pub show_next: bool,
    pub page_count: usize,
}

impl PaginationVisibility {
    /// Whether the prev/next control row is rendered at all
    pub fn show_controls(&self) -> bool {
        !self.show_empty && self.page_count > 1
    }
}

/// Direction of a page-change request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Prev,
    Next,
}

/// Derive control visibility from the current list state
///
/// Out-of-range input is not clamped: a page beyond the page count simply
/// shows a prev control and a next control.
pub fn compute_visibility(
    state: &PaginationState,
    is_loading: bool,
    has_data: bool,
) -> PaginationVisibility {
    let page_count = state.page_count();
    let show_empty = !is_loading && (state.total == 0 || !has_data);

    if show_empty {
        return PaginationVisibility {
            show_empty,
            show_prev: false,
            show_next: false,
            page_count,
        };
    }

    PaginationVisibility {
        show_empty,
        show_prev: state.page > 1,
        show_next: state.page != page_count,
        page_count,
    }
}

/// Page to request when a control is pressed
///
/// Returns `None` when the control is hidden, so an invisible control can
/// never produce a request.
pub fn request_page(
    visibility: &PaginationVisibility,
    page: usize,
    direction: PageDirection,
) -> Option<usize> {
    if !visibility.show_controls() {
        return None;
    }
    match direction {
        PageDirection::Prev if visibility.show_prev => Some(page - 1),
        PageDirection::Next if visibility.show_next => Some(page + 1),
        _ => None,
    }
}
