//! Query orchestration: filter, then sort, then paginate

use super::descriptor::QueryDescriptor;
use super::filter;
use super::paginate::Pagination;
use super::record::{Record, RecordKind};
use super::sort;
use serde::Serialize;
use tracing::debug;

/// One page of a catalog query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult<T> {
    /// Records on the requested page, in sorted order
    pub items: Vec<T>,
    /// Number of records that passed the filter stage
    pub total_matched: usize,
    /// Effective page number
    pub page: usize,
    /// `ceil(total_matched / limit)`
    pub total_pages: usize,
    /// Effective page size
    pub limit: usize,
}

/// Stateless catalog query engine.
///
/// Holds only the per-kind page sizes used when a descriptor has no usable
/// limit; every call is a pure function of its inputs.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    product_page_size: usize,
    artisan_page_size: usize,
}

impl QueryEngine {
    pub fn new(product_page_size: usize, artisan_page_size: usize) -> Self {
        Self {
            product_page_size: product_page_size.max(1),
            artisan_page_size: artisan_page_size.max(1),
        }
    }

    /// Page size used when the descriptor's limit is missing or invalid
    pub fn default_limit(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::Product => self.product_page_size,
            RecordKind::Artisan => self.artisan_page_size,
        }
    }

    /// Run a query over `records`
    pub fn execute<R: Record>(&self, records: &[R], descriptor: &QueryDescriptor) -> QueryResult<R> {
        let mut matched = filter::apply(records, descriptor);

        let sort_field = R::KIND.resolve_sort_field(descriptor.sort_field.as_deref());
        sort::sort_by_field(&mut matched, sort_field, descriptor.sort_order);

        let pagination = Pagination::resolve(
            descriptor.page,
            descriptor.limit,
            self.default_limit(R::KIND),
        );
        let items = pagination.slice(&matched);

        debug!(
            "{} query matched {} of {} (sort {} {:?}, page {} limit {})",
            R::KIND,
            matched.len(),
            records.len(),
            sort_field,
            descriptor.sort_order,
            pagination.page,
            pagination.limit
        );

        QueryResult {
            items,
            total_matched: matched.len(),
            page: pagination.page,
            total_pages: pagination.total_pages(matched.len()),
            limit: pagination.limit,
        }
    }
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new(12, 10)
    }
}
