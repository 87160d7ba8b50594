//! Table view state and its reducers
//!
//! A dashboard keeps one [`TableState`] per table. Every user interaction is a
//! [`TableAction`]; reducing it yields the next state, and [`TableState::view`]
//! renders the current page from the fetched records.

use super::filter::{DateRange, FilterCriteria, filter_records};
use super::pager::{DEFAULT_PAGE_SIZE, Page, clamp_page, paginate, total_pages};
use super::sort::{SortConfig, sort_records};
use crate::core::record::Record;
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq)]
pub enum TableAction {
    SetSearch(String),
    SetDateRange(DateRange),
    /// Exact match on a field; an empty value clears it
    SetFilter { field: String, value: String },
    /// Column-header click
    SortBy(String),
    SetSort(SortConfig),
    GoToPage(usize),
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    pub search: String,
    pub date_range: DateRange,
    pub filters: IndexMap<String, String>,
    pub sort: SortConfig,
    /// Requested page; clamped against the data by [`TableState::clamp_to`]
    pub page: usize,
    pub page_size: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl TableState {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            date_range: DateRange::default(),
            filters: IndexMap::new(),
            sort: SortConfig::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn with_sort(mut self, sort: SortConfig) -> Self {
        self.sort = sort;
        self
    }

    /// Apply one action. Anything that changes which rows are shown, or
    /// their order, returns to the first page.
    pub fn reduce(self, action: TableAction) -> Self {
        match action {
            TableAction::SetSearch(search) => self.set_search(search),
            TableAction::SetDateRange(range) => self.set_date_range(range),
            TableAction::SetFilter { field, value } => self.set_filter(field, value),
            TableAction::SortBy(key) => self.sort_by(&key),
            TableAction::SetSort(sort) => Self {
                sort,
                page: 1,
                ..self
            },
            TableAction::GoToPage(page) => self.go_to_page(page),
            TableAction::NextPage => self.next(),
            TableAction::PrevPage => self.prev(),
            TableAction::FirstPage => self.first(),
            TableAction::LastPage => self.last(),
        }
    }

    pub fn set_search(self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            page: 1,
            ..self
        }
    }

    pub fn set_date_range(self, date_range: DateRange) -> Self {
        Self {
            date_range,
            page: 1,
            ..self
        }
    }

    pub fn set_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        let (field, value) = (field.into(), value.into());
        if value.is_empty() {
            self.filters.shift_remove(&field);
        } else {
            self.filters.insert(field, value);
        }
        self.page = 1;
        self
    }

    pub fn set_department(self, department: impl Into<String>) -> Self {
        self.set_filter("DepartmentName", department)
    }

    pub fn sort_by(self, key: &str) -> Self {
        Self {
            sort: self.sort.toggle(key),
            page: 1,
            ..self
        }
    }

    pub fn go_to_page(self, page: usize) -> Self {
        Self {
            page: page.max(1),
            ..self
        }
    }

    pub fn next(self) -> Self {
        let page = self.page.saturating_add(1);
        self.go_to_page(page)
    }

    pub fn prev(self) -> Self {
        let page = self.page.saturating_sub(1);
        self.go_to_page(page)
    }

    pub fn first(self) -> Self {
        self.go_to_page(1)
    }

    /// Jump past the end; the next clamp lands on the last page
    pub fn last(self) -> Self {
        self.go_to_page(usize::MAX)
    }

    /// Clamp the page against a filtered row count
    pub fn clamp_to(self, total_items: usize) -> Self {
        let page = clamp_page(self.page, total_pages(total_items, self.page_size));
        Self { page, ..self }
    }

    /// Reduce, then clamp against what the records would show
    pub fn apply<T: Record>(self, action: TableAction, records: &[T]) -> Self {
        let next = self.reduce(action);
        let visible = next.visible_count(records);
        next.clamp_to(visible)
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            search: self.search.clone(),
            date_range: self.date_range,
            equals: self
                .filters
                .iter()
                .map(|(field, value)| (field.clone(), value.clone()))
                .collect(),
        }
    }

    fn visible_count<T: Record>(&self, records: &[T]) -> usize {
        let criteria = self.criteria();
        if criteria.is_empty() {
            records.len()
        } else {
            records.iter().filter(|r| criteria.matches(*r)).count()
        }
    }

    /// Every row the table shows across all pages, filtered and sorted
    pub fn rows<T: Record>(&self, records: &[T]) -> Vec<T> {
        let filtered = filter_records(records, &self.criteria());
        sort_records(&filtered, &self.sort)
    }

    /// Filter, sort and paginate
    pub fn view<T: Record>(&self, records: &[T]) -> Page<T> {
        paginate(&self.rows(records), self.page, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::order::Order;
    use crate::table::sort::SortDirection;
    use serde_json::json;

    fn orders(n: usize) -> Vec<Order> {
        (0..n)
            .map(|i| {
                serde_json::from_value(json!({
                    "_id": format!("o{}", i),
                    "wasteType": if i % 2 == 0 { "CoconutHusk" } else { "CoconutShell" },
                    "quantity": i,
                    "amount": (i * 10) as f64
                }))
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_filters_reset_page() {
        let state = TableState::default().go_to_page(3);
        assert_eq!(state.clone().set_search("husk").page, 1);
        assert_eq!(state.clone().set_date_range(DateRange::default()).page, 1);
        assert_eq!(state.clone().set_department("IT").page, 1);
        assert_eq!(state.sort_by("amount").page, 1);
    }

    #[test]
    fn test_sort_by_toggles() {
        let state = TableState::default()
            .reduce(TableAction::SortBy("amount".into()))
            .reduce(TableAction::SortBy("amount".into()));
        assert_eq!(state.sort, SortConfig::new("amount", SortDirection::Desc));
    }

    #[test]
    fn test_page_navigation_is_clamped() {
        let records = orders(25);
        let state = TableState::default().apply(TableAction::LastPage, &records);
        assert_eq!(state.page, 3);
        let state = state.apply(TableAction::NextPage, &records);
        assert_eq!(state.page, 3);
        let state = state
            .apply(TableAction::FirstPage, &records)
            .apply(TableAction::PrevPage, &records);
        assert_eq!(state.page, 1);
        let state = state.apply(TableAction::GoToPage(2), &records);
        assert_eq!(state.view(&records).items.len(), 10);
    }

    #[test]
    fn test_clamp_follows_filtered_count() {
        let records = orders(25);
        let state = TableState::default()
            .apply(TableAction::GoToPage(3), &records)
            .apply(
                TableAction::SetFilter {
                    field: "wasteType".into(),
                    value: "CoconutShell".into(),
                },
                &records,
            );
        assert_eq!(state.page, 1);
        let state = state.apply(TableAction::LastPage, &records);
        assert_eq!(state.page, 2);
    }

    #[test]
    fn test_view_runs_filter_sort_paginate() {
        let records = orders(25);
        let state = TableState::default()
            .set_search("shell")
            .with_sort(SortConfig::new("amount", SortDirection::Desc));
        let page = state.view(&records);
        assert_eq!(page.total_items, 12);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items[0].id, "o23");
        assert_eq!(page.items.len(), 10);
    }

    #[test]
    fn test_clearing_a_filter() {
        let state = TableState::default()
            .set_filter("DepartmentName", "IT")
            .set_filter("DepartmentName", "");
        assert!(state.filters.is_empty());
        assert!(state.criteria().is_empty());
    }
}
