//! Viewport-driven view selection

use serde::{Deserialize, Serialize};

/// Rendering strategy for the record list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// One line-triple per record (primary, secondary, tertiary text)
    Compact,
    /// Card grid showing every field and the available actions
    Full,
}

impl ViewMode {
    pub fn name(&self) -> &'static str {
        match self {
            ViewMode::Compact => "compact",
            ViewMode::Full => "full",
        }
    }
}

/// Named viewport-width thresholds, in terminal columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoints {
    /// Below this width the compact view is used
    pub medium: u16,
    /// At or above this width the card grid uses three columns
    pub large: u16,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            medium: 100,
            large: 150,
        }
    }
}

impl Breakpoints {
    /// Breakpoint predicate: is the viewport narrower than "medium"
    pub fn is_small(&self, width: u16) -> bool {
        width < self.medium
    }
}

/// Pick the view for the current viewport width
pub fn select_view(viewport_width: u16, breakpoint: u16) -> ViewMode {
    if viewport_width < breakpoint {
        ViewMode::Compact
    } else {
        ViewMode::Full
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_view_around_breakpoint() {
        let breakpoint = 100;
        for width in [0, 1, 40, 80, 98, 99] {
            assert_eq!(select_view(width, breakpoint), ViewMode::Compact, "width={width}");
        }
        for width in [100, 101, 150, 400, u16::MAX] {
            assert_eq!(select_view(width, breakpoint), ViewMode::Full, "width={width}");
        }
    }

    #[test]
    fn test_select_view_is_memoryless() {
        let widths = [120, 60, 120, 60, 99, 100];
        let first: Vec<_> = widths.iter().map(|w| select_view(*w, 100)).collect();
        let second: Vec<_> = widths.iter().map(|w| select_view(*w, 100)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_predicate_agrees_with_selector() {
        let bp = Breakpoints::default();
        for width in 0..300 {
            let compact = select_view(width, bp.medium) == ViewMode::Compact;
            assert_eq!(bp.is_small(width), compact);
        }
    }
}
