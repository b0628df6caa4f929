use serde::{Deserialize, Serialize};

/// `max(1, ceil(len / page_size))`. A zero page size is treated as one.
pub fn page_count(len: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    len.div_ceil(page_size).max(1)
}

/// One-based page slice; empty when `page` is outside the available range.
pub fn paginate<T>(items: &[T], page_size: usize, page: usize) -> &[T] {
    let page_size = page_size.max(1);
    if page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// View-owned pagination state. `current_page` is one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    page_size: usize,
    current_page: usize,
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Page navigation. Clamped on the next [`Pagination::clamp`].
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Keep `current_page` inside `[1, page_count(len)]`.
    pub fn clamp(&mut self, len: usize) {
        let last = page_count(len, self.page_size);
        self.current_page = self.current_page.clamp(1, last);
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        paginate(items, self.page_size, self.current_page)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(9)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 9), 1);
        assert_eq!(page_count(9, 9), 1);
        assert_eq!(page_count(10, 9), 2);
        assert_eq!(page_count(25, 9), 3);
        assert_eq!(page_count(5, 0), 5);
    }

    #[test]
    fn test_paginate_25_by_9() {
        let items: Vec<usize> = (0..25).collect();
        assert_eq!(paginate(&items, 9, 1), &items[0..9]);
        assert_eq!(paginate(&items, 9, 3), &items[18..25]);
        assert_eq!(paginate(&items, 9, 3).len(), 7);
        assert!(paginate(&items, 9, 4).is_empty());
        assert!(paginate(&items, 9, 0).is_empty());
    }

    #[test]
    fn test_clamp_to_last_page() {
        let mut p = Pagination::new(9);
        p.set_page(4);
        p.clamp(25);
        assert_eq!(p.current_page(), 3);
        p.clamp(0);
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut p = Pagination::new(10);
        p.set_page(3);
        p.set_page_size(20);
        assert_eq!(p.current_page(), 1);
        assert_eq!(p.page_size(), 20);
    }
}
