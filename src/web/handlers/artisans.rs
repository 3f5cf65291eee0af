//! Artisan directory handlers

use super::{run_query, DataResponse, ListResponse, MessageResponse};
use crate::catalog::{QueryDescriptor, RecordKind};
use crate::models::{Artisan, ArtisanUpdate, NewArtisan};
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
    ApiError::NotFound("Artisan not found".to_string())
}

/// `GET /api/artisans`
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> ApiResult<Json<ListResponse<Artisan>>> {
    let Query(params) = params?;
    let descriptor = QueryDescriptor::from_params(RecordKind::Artisan, &params)?;
    run_query(state.artisans.as_ref(), &state.engine, &descriptor)
        .await
        .map(Json)
}

/// `POST /api/artisans/search` with a JSON query descriptor
pub async fn search(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<ListResponse<Artisan>>> {
    let Json(body) = payload?;
    let descriptor = QueryDescriptor::from_value(RecordKind::Artisan, &body)?;
    run_query(state.artisans.as_ref(), &state.engine, &descriptor)
        .await
        .map(Json)
}

/// `GET /api/artisans/:id`
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<Artisan>>> {
    let artisan = state.artisans.get(&id).await?.ok_or_else(not_found)?;
    Ok(Json(DataResponse::new(artisan)))
}

/// `POST /api/artisans`
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewArtisan>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DataResponse<Artisan>>)> {
    let Json(draft) = payload?;
    let artisan = state
        .artisans
        .insert(draft.into_artisan(Utc::now())?)
        .await?;
    info!("Created artisan {} ({})", artisan.id, artisan.name);

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(
            artisan,
            "Artisan profile created successfully",
        )),
    ))
}

/// `PUT /api/artisans/:id`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ArtisanUpdate>, JsonRejection>,
) -> ApiResult<Json<DataResponse<Artisan>>> {
    let Json(changes) = payload?;
    let mut artisan = state.artisans.get(&id).await?.ok_or_else(not_found)?;
    changes.apply(&mut artisan)?;

    let artisan = state.artisans.update(&id, artisan).await?;
    info!("Updated artisan {}", id);
    Ok(Json(DataResponse::with_message(
        artisan,
        "Artisan profile updated successfully",
    )))
}

/// `DELETE /api/artisans/:id`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.artisans.delete(&id).await?;
    info!("Deleted artisan {}", id);
    Ok(Json(MessageResponse::new(
        "Artisan profile deleted successfully",
    )))
}
