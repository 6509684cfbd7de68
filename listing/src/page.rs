//! Page slicing for data tables.

use serde::Serialize;

/// One page of a (usually filtered) list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually served
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    /// Always at least 1, so an empty list still has a (blank) first page
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Slice `items` into page `page` of `page_size`.
///
/// Pages are 1-based. Out-of-range page numbers are clamped to the first or
/// last page, and a zero page size is treated as one.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_items);
    let slice = items.get(start..end).unwrap_or(&[]);

    Page {
        items: slice.to_vec(),
        page,
        page_size,
        total_items,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_and_last_page() {
        let items: Vec<u32> = (1..=25).collect();

        let page = paginate(&items, 2, 10);
        assert_eq!(page.items, (11..=20).collect::<Vec<_>>());
        assert_eq!(page.total_pages, 3);
        assert!(page.has_previous());
        assert!(page.has_next());

        let last = paginate(&items, 3, 10);
        assert_eq!(last.items, vec![21, 22, 23, 24, 25]);
        assert!(!last.has_next());
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let items = vec!["a", "b", "c"];
        assert_eq!(paginate(&items, 0, 2).page, 1);

        let beyond = paginate(&items, 9, 2);
        assert_eq!(beyond.page, 2);
        assert_eq!(beyond.items, vec!["c"]);
    }

    #[test]
    fn test_empty_list_has_one_blank_page() {
        let items: Vec<u8> = Vec::new();
        let page = paginate(&items, 1, 0);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page_size, 1);
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }
}
