//! Catalog query engine
//!
//! Filters, sorts and paginates in-memory collections of products and
//! artisans. The engine is a pure function of `(records, descriptor)`:
//! - filter: free-text search plus conjunctive field criteria
//! - sort: stable single-field ordering with fallback to the date field
//! - paginate: coerced page window with totals computed before slicing

mod descriptor;
mod engine;
pub mod filter;
mod paginate;
mod record;
pub mod sort;

pub use descriptor::{Filter, QueryDescriptor, SortOrder};
pub use engine::{QueryEngine, QueryResult};
pub use paginate::Pagination;
pub use record::{FieldValue, Record, RecordKind};

/// Errors raised while building a query descriptor
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid query descriptor: {0}")]
    InvalidDescriptor(String),
}
