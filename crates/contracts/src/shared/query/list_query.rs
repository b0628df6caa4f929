use serde::{Deserialize, Serialize};

use super::filter::{FilterSet, Searchable, TextQuery};
use super::paginate::{page_count, Pagination};
use super::sort::{sort_stable, Comparator};

/// Filter, search, sort and pagination state of one list view.
///
/// Changing filters, search text or sort key sends the view back to page 1;
/// page navigation leaves everything else alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListQuery<F, S> {
    filters: F,
    search: TextQuery,
    sort: S,
    pagination: Pagination,
}

/// Rows of the current page plus the numbers the pagination controls need.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome<P> {
    pub rows: Vec<P>,
    pub source_count: usize,
    pub filtered_count: usize,
    pub page_count: usize,
    pub current_page: usize,
    pub page_size: usize,
}

impl<P> QueryOutcome<P> {
    pub fn is_empty(&self) -> bool {
        self.filtered_count == 0
    }

    /// 1-based index range of the visible rows, e.g. `(10, 18)`.
    pub fn visible_range(&self) -> Option<(usize, usize)> {
        if self.rows.is_empty() {
            return None;
        }
        let first = (self.current_page - 1) * self.page_size + 1;
        Some((first, first + self.rows.len() - 1))
    }
}

impl<F: Default, S: Default> ListQuery<F, S> {
    pub fn new(page_size: usize) -> Self {
        Self {
            filters: F::default(),
            search: TextQuery::default(),
            sort: S::default(),
            pagination: Pagination::new(page_size),
        }
    }

    pub fn clear_filters(&mut self) {
        self.filters = F::default();
        self.pagination.reset();
    }
}

impl<F, S> ListQuery<F, S> {
    pub fn filters(&self) -> &F {
        &self.filters
    }

    pub fn search(&self) -> &str {
        self.search.as_str()
    }

    pub fn sort(&self) -> &S {
        &self.sort
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn current_page(&self) -> usize {
        self.pagination.current_page()
    }

    pub fn set_filters(&mut self, filters: F) {
        self.filters = filters;
        self.pagination.reset();
    }

    pub fn update_filters(&mut self, f: impl FnOnce(&mut F)) {
        f(&mut self.filters);
        self.pagination.reset();
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = TextQuery::new(text);
        self.pagination.reset();
    }

    pub fn set_sort(&mut self, sort: S) {
        self.sort = sort;
        self.pagination.reset();
    }

    pub fn set_page(&mut self, page: usize) {
        self.pagination.set_page(page);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.pagination.set_page_size(page_size);
    }

    /// Filtered and sorted records, borrowed from `source`.
    pub fn filtered<'a, R>(&self, source: &'a [R]) -> Vec<&'a R>
    where
        R: Searchable,
        F: FilterSet<R>,
        S: Comparator<R>,
    {
        let mut rows: Vec<&R> = source
            .iter()
            .filter(|r| self.search.matches_any(r.search_fields()) && self.filters.matches(r))
            .collect();
        sort_stable(&mut rows, &self.sort);
        rows
    }

    /// Run the whole pipeline and clamp the stored page to the result.
    pub fn run<R, P>(&mut self, source: &[R], project: impl Fn(&R) -> P) -> QueryOutcome<P>
    where
        R: Searchable,
        F: FilterSet<R>,
        S: Comparator<R>,
    {
        let rows = self.filtered(source);
        self.pagination.clamp(rows.len());
        let page = self.pagination.slice(&rows);
        QueryOutcome {
            rows: page.iter().map(|r| project(r)).collect(),
            source_count: source.len(),
            filtered_count: rows.len(),
            page_count: page_count(rows.len(), self.pagination.page_size()),
            current_page: self.pagination.current_page(),
            page_size: self.pagination.page_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: String,
        score: u32,
    }

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![&self.name]
        }
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    struct MinScore(u32);

    impl FilterSet<Row> for MinScore {
        fn matches(&self, record: &Row) -> bool {
            record.score >= self.0
        }

        fn active_count(&self) -> usize {
            usize::from(self.0 > 0)
        }
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    enum RowSort {
        #[default]
        Insertion,
        ScoreDesc,
    }

    impl Comparator<Row> for RowSort {
        fn compare(&self, a: &Row, b: &Row) -> Ordering {
            match self {
                RowSort::Insertion => Ordering::Equal,
                RowSort::ScoreDesc => b.score.cmp(&a.score),
            }
        }
    }

    fn rows(n: u32) -> Vec<Row> {
        (0..n)
            .map(|i| Row {
                name: format!("row {i}"),
                score: i % 5,
            })
            .collect()
    }

    #[test]
    fn test_default_query_is_identity() {
        let data = rows(7);
        let mut q: ListQuery<MinScore, RowSort> = ListQuery::new(100);
        let out = q.run(&data, |r| r.clone());
        assert_eq!(out.rows, data);
        assert_eq!(out.page_count, 1);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let data = rows(30);
        let mut q: ListQuery<MinScore, RowSort> = ListQuery::new(5);
        q.set_page(3);
        assert_eq!(q.run(&data, |r| r.name.clone()).current_page, 3);

        q.update_filters(|f| f.0 = 2);
        assert_eq!(q.current_page(), 1);

        q.set_page(2);
        q.set_search("row");
        assert_eq!(q.current_page(), 1);

        q.set_page(2);
        q.set_sort(RowSort::ScoreDesc);
        assert_eq!(q.current_page(), 1);
    }

    #[test]
    fn test_page_navigation_keeps_filter_state() {
        let data = rows(30);
        let mut q: ListQuery<MinScore, RowSort> = ListQuery::new(5);
        q.update_filters(|f| f.0 = 1);
        q.set_search("row");
        q.set_sort(RowSort::ScoreDesc);
        q.set_page(2);
        assert_eq!(q.filters(), &MinScore(1));
        assert_eq!(q.search(), "row");
        assert_eq!(q.sort(), &RowSort::ScoreDesc);
        assert_eq!(q.current_page(), 2);
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let data = rows(25);
        let mut q: ListQuery<MinScore, RowSort> = ListQuery::new(9);
        q.set_page(4);
        let out = q.run(&data, |r| r.name.clone());
        assert_eq!(out.page_count, 3);
        assert_eq!(out.current_page, 3);
        assert_eq!(out.rows.len(), 7);
        assert_eq!(out.rows.first().map(String::as_str), Some("row 18"));
        assert_eq!(out.visible_range(), Some((19, 25)));
    }

    #[test]
    fn test_empty_result_has_one_page() {
        let data = rows(10);
        let mut q: ListQuery<MinScore, RowSort> = ListQuery::new(9);
        q.set_search("no such row");
        let out = q.run(&data, |r| r.name.clone());
        assert!(out.is_empty());
        assert_eq!(out.page_count, 1);
        assert_eq!(out.current_page, 1);
        assert_eq!(out.visible_range(), None);
    }
}
