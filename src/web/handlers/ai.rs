//! AI helper handlers

use super::DataResponse;
use crate::ai::generate::{self, DescriptionRequest, GeneratedDescription};
use crate::ai::recommend::{self, RecommendationRequest, Recommendations};
use crate::ai::search::{self, EnhancedQuery, SearchRequest};
use crate::ai::tags::{self, TagRequest, TagSuggestion};
use crate::ai::vision::{self, ImageAnalysis};
use crate::web::error::{ApiError, ApiResult};
use crate::web::state::AppState;
use axum::{
    extract::multipart::{Multipart, MultipartRejection},
    extract::rejection::JsonRejection,
    extract::State,
    Json,
};
use tracing::{error, info, warn};

/// `POST /api/ai/analyze-image` with a multipart `image` field.
///
/// The upload is analysed in memory and never written to disk.
pub async fn analyze_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<DataResponse<ImageAnalysis>>> {
    let mut multipart = multipart?;
    let settings = &state.settings.ai;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("image") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        if !vision::is_allowed_image(&file_name, &content_type, &settings.allowed_image_types) {
            warn!("Rejected upload {:?} ({})", file_name, content_type);
            return Err(ApiError::bad_request("Only image files are allowed"));
        }

        let bytes = field.bytes().await?;
        if bytes.len() > settings.max_upload_bytes {
            warn!("Rejected upload {:?}: {} bytes", file_name, bytes.len());
            return Err(ApiError::PayloadTooLarge("File too large".to_string()));
        }

        info!(
            "Analyzing image {:?} ({} bytes) with {} labels",
            file_name,
            bytes.len(),
            state.labels.name()
        );
        let analysis = vision::analyze(state.labels.as_ref(), &bytes)
            .await
            .map_err(|e| {
                error!("Image analysis failed: {}", e);
                ApiError::Internal("Server error while analyzing image".to_string())
            })?;

        return Ok(Json(DataResponse::with_message(
            analysis,
            "Image analyzed successfully",
        )));
    }

    Err(ApiError::bad_request("No image file provided"))
}

/// `POST /api/ai/generate-description`
pub async fn generate_description(
    payload: Result<Json<DescriptionRequest>, JsonRejection>,
) -> ApiResult<Json<DataResponse<GeneratedDescription>>> {
    let Json(request) = payload?;
    let generated = generate::generate(&request)?;
    Ok(Json(DataResponse::with_message(
        generated,
        "Description generated successfully",
    )))
}

/// `POST /api/ai/suggest-tags`
pub async fn suggest_tags(
    payload: Result<Json<TagRequest>, JsonRejection>,
) -> ApiResult<Json<DataResponse<TagSuggestion>>> {
    let Json(request) = payload?;
    let suggestion = tags::suggest(&request)?;
    Ok(Json(DataResponse::with_message(
        suggestion,
        "Tags suggested successfully",
    )))
}

/// `POST /api/ai/enhance-search`
pub async fn enhance_search(
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> ApiResult<Json<DataResponse<EnhancedQuery>>> {
    let Json(request) = payload?;
    let enhanced = search::enhance(&request)?;
    Ok(Json(DataResponse::with_message(
        enhanced,
        "Search query enhanced successfully",
    )))
}

/// `POST /api/ai/personalize-recommendations`
pub async fn personalize_recommendations(
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> ApiResult<Json<DataResponse<Recommendations>>> {
    let Json(request) = payload?;
    Ok(Json(DataResponse::with_message(
        recommend::recommend(&request),
        "Recommendations generated successfully",
    )))
}
