//! Product catalog handlers

use super::{matching, run_query, CollectionResponse, DataResponse, ListResponse, MessageResponse};
use crate::catalog::{Filter, QueryDescriptor, RecordKind};
use crate::models::{NewProduct, Product, ProductUpdate};
use crate::web::error::{ApiError, ApiResult};
use crate::web::state::AppState;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use tracing::info;

fn not_found() -> ApiError {
    ApiError::NotFound("Product not found".to_string())
}

/// `GET /api/products`
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> ApiResult<Json<ListResponse<Product>>> {
    let Query(params) = params?;
    let descriptor = QueryDescriptor::from_params(RecordKind::Product, &params)?;
    run_query(state.products.as_ref(), &state.engine, &descriptor)
        .await
        .map(Json)
}

/// `POST /api/products/search` with a JSON query descriptor
pub async fn search(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<ListResponse<Product>>> {
    let Json(body) = payload?;
    let descriptor = QueryDescriptor::from_value(RecordKind::Product, &body)?;
    run_query(state.products.as_ref(), &state.engine, &descriptor)
        .await
        .map(Json)
}

/// `GET /api/products/:id`
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<Product>>> {
    let product = state.products.get(&id).await?.ok_or_else(not_found)?;
    Ok(Json(DataResponse::new(product)))
}

/// `GET /api/products/artisan/:artisan_id`
pub async fn by_artisan(
    State(state): State<AppState>,
    Path(artisan_id): Path<String>,
) -> ApiResult<Json<CollectionResponse<Product>>> {
    let descriptor = QueryDescriptor::new().with_filter(Filter::id_equals("artisanId", artisan_id));
    let products = matching(state.products.as_ref(), &descriptor).await?;
    Ok(Json(CollectionResponse::new(products)))
}

/// `GET /api/products/category/:category`
pub async fn by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> ApiResult<Json<CollectionResponse<Product>>> {
    let descriptor = QueryDescriptor::new().with_filter(Filter::equals("category", category));
    let products = matching(state.products.as_ref(), &descriptor).await?;
    Ok(Json(CollectionResponse::new(products)))
}

/// `POST /api/products`
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DataResponse<Product>>)> {
    let Json(draft) = payload?;
    let mut product = draft.into_product(Utc::now())?;

    // fill display fields from the maker's profile when the client left them out
    if let Some(artisan) = state.artisans.get(&product.artisan_id).await? {
        product.artisan.get_or_insert(artisan.name);
        product.location.get_or_insert(artisan.location);
    }

    let product = state.products.insert(product).await?;
    info!("Created product {} ({})", product.id, product.title);

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(product, "Product created successfully")),
    ))
}

/// `PUT /api/products/:id`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductUpdate>, JsonRejection>,
) -> ApiResult<Json<DataResponse<Product>>> {
    let Json(changes) = payload?;
    let mut product = state.products.get(&id).await?.ok_or_else(not_found)?;
    changes.apply(&mut product, Utc::now())?;

    let product = state.products.update(&id, product).await?;
    info!("Updated product {}", id);
    Ok(Json(DataResponse::with_message(
        product,
        "Product updated successfully",
    )))
}

/// `DELETE /api/products/:id`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.products.delete(&id).await?;
    info!("Deleted product {}", id);
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}
