//! Page-based partitioning of large item collections.
//!
//! `Paging` is an immutable-per-request value: methods return a new value
//! instead of mutating, so a fetch in flight always sees the page it was
//! issued with.

pub const DEFAULT_PAGE_SIZE: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Paging {
    page_size: usize,
    current_page: usize,
    total_items: usize,
}

impl Default for Paging {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paging {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 0,
            total_items: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    pub fn offset(&self) -> usize {
        self.current_page * self.page_size
    }

    /// Set the total item count, clamping the current page into range.
    pub fn with_total(self, total_items: usize) -> Self {
        let mut p = Self { total_items, ..self };
        p.current_page = p.clamp_page(p.current_page);
        p
    }

    /// Select a page, clamped to `[0, total_pages)`.
    pub fn select_page(self, page: usize) -> Self {
        Self {
            current_page: self.clamp_page(page),
            ..self
        }
    }

    pub fn next_page(self) -> Self {
        self.select_page(self.current_page.saturating_add(1))
    }

    pub fn prev_page(self) -> Self {
        self.select_page(self.current_page.saturating_sub(1))
    }

    fn clamp_page(&self, page: usize) -> usize {
        page.min(self.total_pages().saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_is_ceiling_division() {
        assert_eq!(Paging::new(100).with_total(0).total_pages(), 0);
        assert_eq!(Paging::new(100).with_total(1).total_pages(), 1);
        assert_eq!(Paging::new(100).with_total(100).total_pages(), 1);
        assert_eq!(Paging::new(100).with_total(101).total_pages(), 2);
        assert_eq!(Paging::new(7).with_total(50).total_pages(), 8);
    }

    #[test]
    fn offset_is_page_times_size() {
        let p = Paging::new(25).with_total(120);
        for page in 0..p.total_pages() {
            assert_eq!(p.select_page(page).offset(), page * 25);
        }
    }

    #[test]
    fn page_selection_is_clamped() {
        let p = Paging::new(10).with_total(35);
        assert_eq!(p.total_pages(), 4);
        assert_eq!(p.select_page(99).current_page(), 3);
        assert_eq!(p.select_page(0).prev_page().current_page(), 0);
        assert_eq!(p.select_page(3).next_page().current_page(), 3);
    }

    #[test]
    fn shrinking_total_clamps_current_page() {
        let p = Paging::new(10).with_total(100).select_page(9);
        assert_eq!(p.with_total(15).current_page(), 1);
        assert_eq!(p.with_total(0).current_page(), 0);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert_eq!(Paging::new(0).page_size(), 1);
    }
}
