//! Pager: fixed-size, 1-indexed pages with a clamped current page

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of page buttons shown around the current page
pub const DEFAULT_PAGE_WINDOW: usize = 5;

/// One page of a (filtered, sorted) collection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Current page after clamping (1 for an empty collection)
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    /// 0 for an empty collection
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn window(&self, width: usize) -> Vec<usize> {
        page_window(self.page, self.total_pages, width)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// `ceil(total / page_size)`; a zero page size counts as one
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1))
}

/// Clamp a requested page into `[1, total_pages]`
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Slice out one page. Out-of-range requests land on the nearest valid page.
pub fn paginate<T: Clone>(records: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = records.len();
    let total_pages = total_pages(total_items, page_size);
    let page = clamp_page(page, total_pages);

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_items);
    let items = records.get(start..end).map(<[T]>::to_vec).unwrap_or_default();

    Page {
        items,
        page,
        page_size,
        total_items,
        total_pages,
    }
}

/// Page numbers to show as buttons: at most `width` consecutive pages,
/// centred on `current` and shifted so they stay inside `[1, total_pages]`.
pub fn page_window(current: usize, total_pages: usize, width: usize) -> Vec<usize> {
    if total_pages == 0 || width == 0 {
        return Vec::new();
    }
    let current = clamp_page(current, total_pages);
    let mut start = current.saturating_sub(width / 2).max(1);
    let mut end = start + width - 1;
    if end > total_pages {
        end = total_pages;
        start = (end + 1).saturating_sub(width).max(1);
    }
    (start..=end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn test_first_page() {
        let page = paginate(&numbers(25), 1, 10);
        assert_eq!(page.items, numbers(10));
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next());
        assert!(!page.has_prev());
    }

    #[test]
    fn test_last_partial_page() {
        let page = paginate(&numbers(25), 3, 10);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert!(!page.has_next());
    }

    #[test]
    fn test_out_of_range_requests_are_clamped() {
        assert_eq!(paginate(&numbers(25), 9, 10).page, 3);
        assert_eq!(paginate(&numbers(25), 0, 10).page, 1);
    }

    #[test]
    fn test_empty_collection() {
        let page = paginate::<usize>(&[], 4, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next());
        assert!(!page.has_prev());
    }

    #[test]
    fn test_pages_reconstruct_collection() {
        let all = numbers(47);
        let pages = total_pages(all.len(), 10);
        let rebuilt: Vec<usize> = (1..=pages)
            .flat_map(|p| paginate(&all, p, 10).items)
            .collect();
        assert_eq!(rebuilt, all);
    }

    #[test]
    fn test_zero_page_size_counts_as_one() {
        let page = paginate(&numbers(3), 2, 0);
        assert_eq!(page.items, vec![2]);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_window_centred_and_shifted() {
        assert_eq!(page_window(1, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(6, 10, 5), vec![4, 5, 6, 7, 8]);
        assert_eq!(page_window(10, 10, 5), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(2, 3, 5), vec![1, 2, 3]);
        assert!(page_window(1, 0, 5).is_empty());
    }
}
