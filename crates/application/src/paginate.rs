//! Page window arithmetic. Renderers get every pagination number from here.

use std::ops::Range;

use bookconnect_core::PageSize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    page_number: usize,
    page_size: PageSize,
}

impl PageState {
    pub fn first(page_size: PageSize) -> Self {
        Self {
            page_number: 1,
            page_size,
        }
    }

    /// Page numbers below 1 are clamped to 1.
    pub fn at(page_size: PageSize, page_number: usize) -> Self {
        Self {
            page_number: page_number.max(1),
            page_size,
        }
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn next(&self) -> Self {
        Self {
            page_number: self.page_number.saturating_add(1),
            page_size: self.page_size,
        }
    }

    /// Number of records covered by pages `1..=page_number`.
    fn revealed_count(&self) -> usize {
        self.page_number.saturating_mul(self.page_size.get())
    }
}

/// Half-open index range `[start, end)` into a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Window {
    pub start: usize,
    pub end: usize,
}

impl Window {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Slice belonging to the current page alone.
pub fn window_for(len: usize, page: PageState) -> Window {
    let size = page.page_size.get();
    let start = (page.page_number - 1).saturating_mul(size).min(len);
    let end = start.saturating_add(size).min(len);
    Window { start, end }
}

/// Everything revealed so far, from the first record through the current page.
pub fn revealed(len: usize, page: PageState) -> Window {
    Window {
        start: 0,
        end: page.revealed_count().min(len),
    }
}

pub fn remaining(len: usize, page: PageState) -> usize {
    len.saturating_sub(page.revealed_count())
}

pub fn is_exhausted(len: usize, page: PageState) -> bool {
    remaining(len, page) == 0
}

pub fn show_more_label(remaining: usize) -> String {
    format!("Show more ({remaining})")
}
