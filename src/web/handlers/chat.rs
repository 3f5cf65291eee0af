//! Chat assistant handlers

use super::{DataResponse, MessageResponse};
use crate::assistant::{Exchange, History, Transcription};
use crate::web::error::{ApiError, ApiResult};
use crate::web::state::AppState;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRequest {
    pub message: Option<String>,
    pub session_id: Option<String>,
    /// Client page context; accepted but not used for intent matching
    #[serde(default)]
    pub context: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceRequest {
    pub audio_data: Option<String>,
    pub language: Option<String>,
}

/// `POST /api/chat/message`
pub async fn message(
    State(state): State<AppState>,
    payload: Result<Json<MessageRequest>, JsonRejection>,
) -> ApiResult<Json<DataResponse<Exchange>>> {
    let Json(request) = payload?;
    let text = request
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Message is required"))?;

    let exchange = state.assistant.send(request.session_id, &text).await;
    Ok(Json(DataResponse::new(exchange)))
}

/// `GET /api/chat/history/:session_id`
pub async fn history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    params: Result<Query<HistoryParams>, QueryRejection>,
) -> ApiResult<Json<DataResponse<History>>> {
    let Query(params) = params?;
    let limit = params
        .limit
        .and_then(|l| l.trim().parse::<usize>().ok())
        .filter(|l| *l > 0)
        .unwrap_or(state.settings.chat.default_history_page);

    let history = state.assistant.history(&session_id, limit).await;
    Ok(Json(DataResponse::new(history)))
}

/// `DELETE /api/chat/session/:session_id`
pub async fn clear_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<MessageResponse> {
    state.assistant.clear(&session_id).await;
    Json(MessageResponse::new(
        "Conversation history cleared successfully",
    ))
}

/// `POST /api/chat/voice-to-text`
pub async fn voice_to_text(
    State(state): State<AppState>,
    payload: Result<Json<VoiceRequest>, JsonRejection>,
) -> ApiResult<Json<DataResponse<Transcription>>> {
    let Json(request) = payload?;
    let audio = request
        .audio_data
        .filter(|a| !a.is_empty())
        .ok_or_else(|| ApiError::bad_request("Audio data is required"))?;
    let language = request.language.unwrap_or_else(|| "en-US".to_string());

    let transcription = state.assistant.transcribe(&audio, &language);
    Ok(Json(DataResponse::with_message(
        transcription,
        "Audio transcribed successfully",
    )))
}
