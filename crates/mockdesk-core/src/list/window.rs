//! Pagination window.

use crate::error::InvalidInputError;
use crate::Result;

/// Rows per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// A `(page index, page size)` pair. The page size is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationWindow {
    page: usize,
    page_size: usize,
}

impl PaginationWindow {
    /// A window on page 0.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero page size.
    pub fn new(page_size: usize) -> Result<Self> {
        Self::check_size(page_size)?;
        Ok(Self { page: 0, page_size })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages needed for `total` rows; zero rows still make one page.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// The page index actually shown for `total` rows.
    pub fn effective_page(&self, total: usize) -> usize {
        self.page.min(self.page_count(total) - 1)
    }

    /// Row range of the effective page within `total` rows.
    pub fn range(&self, total: usize) -> std::ops::Range<usize> {
        let start = (self.effective_page(total) * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        start..end
    }

    /// Move to `page`, clamped to the last page of `total` rows.
    pub fn set_page(&mut self, page: usize, total: usize) {
        self.page = page;
        self.clamp(total);
    }

    /// Change the page size and go back to page 0.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        Self::check_size(page_size)?;
        self.page_size = page_size;
        self.page = 0;
        Ok(())
    }

    /// Back to page 0.
    pub fn reset(&mut self) {
        self.page = 0;
    }

    /// Pull the page index back inside `total` rows.
    pub fn clamp(&mut self, total: usize) {
        self.page = self.effective_page(total);
    }

    fn check_size(page_size: usize) -> Result<()> {
        if page_size == 0 {
            return Err(InvalidInputError::Other {
                message: "page size must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for PaginationWindow {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
