//! HTTP request handlers

pub mod ai;
pub mod artisans;
pub mod chat;
pub mod products;
pub mod system;

use super::error::ApiResult;
use crate::catalog::{QueryDescriptor, QueryEngine, QueryResult, Record};
use crate::store::Repository;
use serde::Serialize;

/// One page of catalog records
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    /// Records on this page
    pub count: usize,
    /// Records matching the query across all pages
    pub total: usize,
    pub page: usize,
    pub pages: usize,
    pub data: Vec<T>,
}

impl<T> From<QueryResult<T>> for ListResponse<T> {
    fn from(result: QueryResult<T>) -> Self {
        Self {
            success: true,
            count: result.items.len(),
            total: result.total_matched,
            page: result.page,
            pages: result.total_pages,
            data: result.items,
        }
    }
}

/// Unpaginated list of records
#[derive(Debug, Serialize)]
pub struct CollectionResponse<T> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> CollectionResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// Single payload with an optional status message
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    pub fn with_message(data: T, message: &'static str) -> Self {
        Self {
            success: true,
            data,
            message: Some(message),
        }
    }
}

/// Acknowledgement without a payload
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }
}

/// Run a catalog query against a snapshot of `repo`
pub(crate) async fn run_query<T: Record>(
    repo: &dyn Repository<T>,
    engine: &QueryEngine,
    descriptor: &QueryDescriptor,
) -> ApiResult<ListResponse<T>> {
    let records = repo.list().await?;
    Ok(engine.execute(&records, descriptor).into())
}

/// Records of `repo` matching `descriptor`'s filters, in storage order
pub(crate) async fn matching<T: Record>(
    repo: &dyn Repository<T>,
    descriptor: &QueryDescriptor,
) -> ApiResult<Vec<T>> {
    let records = repo.list().await?;
    Ok(crate::catalog::filter::apply(&records, descriptor)
        .into_iter()
        .cloned()
        .collect())
}
