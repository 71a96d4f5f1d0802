use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

/// Page request after clamping: `page >= 1`, `1 <= limit <= 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Pagination {
    /// Out-of-range values fall back to the defaults instead of failing the request.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = match page {
            Some(p) if p >= 1 => p as u64,
            _ => DEFAULT_PAGE,
        };
        let limit = match limit {
            Some(l) if (1..=MAX_LIMIT as i64).contains(&l) => l as u64,
            _ => DEFAULT_LIMIT,
        };
        Pagination { page, limit }
    }

    /// Saturates at `i64::MAX`, the largest skip the stores accept.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit).min(i64::MAX as u64)
    }

    /// Applies this page to an already ordered list.
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        items
            .iter()
            .skip(self.offset() as usize)
            .take(self.limit as usize)
            .cloned()
            .collect()
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl PageMeta {
    pub fn new(pagination: Pagination, total: u64) -> Self {
        PageMeta {
            page: pagination.page,
            limit: pagination.limit,
            total,
            total_pages: total.div_ceil(pagination.limit),
        }
    }
}

/// One page of results plus the total count across all pages.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Page { items, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_below_one_clamps_to_one() {
        assert_eq!(Pagination::new(Some(0), None).page, 1);
        assert_eq!(Pagination::new(Some(-4), None).page, 1);
        assert_eq!(Pagination::new(None, None).page, 1);
        assert_eq!(Pagination::new(Some(3), None).page, 3);
    }

    #[test]
    fn limit_outside_range_falls_back_to_ten() {
        assert_eq!(Pagination::new(None, Some(0)).limit, 10);
        assert_eq!(Pagination::new(None, Some(500)).limit, 10);
        assert_eq!(Pagination::new(None, Some(50)).limit, 50);
        assert_eq!(Pagination::new(None, Some(1)).limit, 1);
        assert_eq!(Pagination::new(None, Some(100)).limit, 100);
        assert_eq!(Pagination::new(None, Some(101)).limit, 10);
    }

    #[test]
    fn total_pages_rounds_up() {
        let pagination = Pagination::new(Some(1), Some(10));
        assert_eq!(PageMeta::new(pagination, 0).total_pages, 0);
        assert_eq!(PageMeta::new(pagination, 10).total_pages, 1);
        assert_eq!(PageMeta::new(pagination, 11).total_pages, 2);
        assert_eq!(PageMeta::new(pagination, 25).total_pages, 3);
    }

    #[test]
    fn last_page_holds_the_remainder() {
        let items: Vec<u32> = (0..25).collect();

        let full = Pagination::new(Some(2), Some(10)).slice(&items);
        assert_eq!(full.len(), 10);
        assert_eq!(full[0], 10);

        let last = Pagination::new(Some(3), Some(10)).slice(&items);
        assert_eq!(last, vec![20, 21, 22, 23, 24]);

        let past_end = Pagination::new(Some(4), Some(10)).slice(&items);
        assert!(past_end.is_empty());
    }

    #[test]
    fn huge_page_is_past_the_end() {
        let items: Vec<u32> = (0..25).collect();

        let farthest = Pagination::new(Some(i64::MAX), Some(100));
        assert_eq!(farthest.offset(), i64::MAX as u64);
        assert!(farthest.slice(&items).is_empty());

        let wrapping = Pagination::new(Some((1_i64 << 62) + 1), Some(4));
        assert_eq!(wrapping.offset(), i64::MAX as u64);
        assert!(wrapping.slice(&items).is_empty());
    }

    #[test]
    fn exact_multiple_fills_the_last_page() {
        let items: Vec<u32> = (0..20).collect();
        let last = Pagination::new(Some(2), Some(10)).slice(&items);
        assert_eq!(last.len(), 10);
    }
}
