//! Text presentation of the referral slice for the CLI.

mod table;

pub use table::{render_detail, render_table};

use crate::domain::Pagination;

/// Page-number view of a [`Pagination`] window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub current_page: u64,
    pub total_pages: u64,
    pub limit: u64,
}

impl PageWindow {
    pub fn new(pagination: &Pagination) -> Self {
        let limit = pagination.limit.max(1);
        Self {
            current_page: pagination.offset / limit + 1,
            total_pages: pagination.total.div_ceil(limit).max(1),
            limit,
        }
    }

    /// Offset of the first row on 1-based `page`.
    pub fn offset_for_page(&self, page: u64) -> u64 {
        page.saturating_sub(1) * self.limit
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

impl From<&Pagination> for PageWindow {
    fn from(pagination: &Pagination) -> Self {
        Self::new(pagination)
    }
}
