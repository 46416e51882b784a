//! Mapping match rows to pages.

use std::ops::RangeInclusive;

use crate::host::TableHost;

/// The page of 0-based row `row_index` when pages hold `page_size` rows.
///
/// Row 0 is on page 1. A row whose index is an exact multiple of the page
/// size opens the next page: with a page size of 2, row 2 is the first row
/// of page 2, not the last row of page 1.
pub fn page_of(row_index: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    row_index / page_size + 1
}

/// Whether revealing a row needs a page change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDecision {
    /// The row is on the page already shown.
    Stay,
    /// Switch to this 1-based page first.
    Change(usize),
}

/// Pagination as seen for one navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationView {
    pub current: usize,
    pub page_size: usize,
    /// True when the host has no pagination and all rows form one page.
    pub synthesized: bool,
}

impl PaginationView {
    /// Read the host's pagination, or synthesize a single page.
    pub fn resolve<H: TableHost + ?Sized>(host: &H) -> Self {
        match host.pagination() {
            Some(pagination) => {
                if pagination.current == 0 || pagination.page_size == 0 {
                    log::warn!("host reported unusable pagination {pagination:?}");
                }
                Self {
                    current: pagination.current.max(1),
                    page_size: pagination.page_size.max(1),
                    synthesized: false,
                }
            }
            None => Self::single_page(host.data_source().len()),
        }
    }

    pub fn single_page(rows: usize) -> Self {
        Self {
            current: 1,
            page_size: rows.max(1),
            synthesized: true,
        }
    }

    /// Data source rows shown on the current page, given `row_count` rows.
    pub fn row_range(&self, row_count: usize) -> Option<RangeInclusive<usize>> {
        let last = row_count.checked_sub(1)?;
        let start = (self.current - 1) * self.page_size;
        let end = (self.current * self.page_size - 1).min(last);
        (start <= end).then_some(start..=end)
    }

    pub fn decide(&self, row_index: usize) -> PageDecision {
        if self.synthesized {
            return PageDecision::Stay;
        }
        match page_of(row_index, self.page_size) {
            page if page == self.current => PageDecision::Stay,
            page => PageDecision::Change(page),
        }
    }
}
