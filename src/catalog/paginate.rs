//! Pagination stage

/// Effective page window after coercion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-indexed page number
    pub page: usize,
    /// Items per page, always at least one
    pub limit: usize,
}

impl Pagination {
    /// Coerce requested values: a missing or non-positive page becomes 1, a
    /// missing or non-positive limit becomes `default_limit`.
    pub fn resolve(page: Option<i64>, limit: Option<i64>, default_limit: usize) -> Self {
        let page = page.filter(|p| *p > 0).map_or(1, |p| p as usize);
        let limit = limit
            .filter(|l| *l > 0)
            .map_or(default_limit, |l| l as usize)
            .max(1);
        Self { page, limit }
    }

    /// Index of the first item on this page
    pub fn start(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// One past the last item on this page
    pub fn end(&self) -> usize {
        self.start().saturating_add(self.limit)
    }

    /// `ceil(total / limit)`
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.limit)
    }

    /// Clone out the items that fall on this page
    pub fn slice<T: Clone>(&self, items: &[&T]) -> Vec<T> {
        if self.start() >= items.len() {
            return Vec::new();
        }
        let end = self.end().min(items.len());
        items[self.start()..end].iter().map(|item| (*item).clone()).collect()
    }
}
