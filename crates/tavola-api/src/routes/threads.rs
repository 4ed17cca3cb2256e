use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use tavola_memory::MemoryStats;
use tavola_types::{Message, MessageRole};

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub role: MessageRole,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub thread_id: String,
    pub messages: Vec<MessageResponse>,
}

/// List a thread's messages in conversational order
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<String>,
) -> ApiResult<Json<HistoryResponse>> {
    let memory = state.engine.memory();
    if !memory.exists(&thread_id) {
        return Err(ApiError::ThreadNotFound(thread_id));
    }

    let messages = memory
        .history(&thread_id)
        .into_iter()
        .map(message_to_response)
        .collect();

    Ok(Json(HistoryResponse { thread_id, messages }))
}

/// Thread memory statistics
pub async fn get_thread(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<String>,
) -> ApiResult<Json<MemoryStats>> {
    let memory = state.engine.memory();
    if !memory.exists(&thread_id) {
        return Err(ApiError::ThreadNotFound(thread_id));
    }

    Ok(Json(memory.stats(&thread_id)))
}

/// Clear a thread's memory. The identifier stays live: a later message
/// on the same thread starts from a clean slate.
pub async fn clear_thread(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<String>,
) -> ApiResult<StatusCode> {
    let memory = state.engine.memory();
    if !memory.exists(&thread_id) {
        return Err(ApiError::ThreadNotFound(thread_id));
    }

    memory.clear(&thread_id);
    Ok(StatusCode::NO_CONTENT)
}

fn message_to_response(message: Message) -> MessageResponse {
    MessageResponse {
        role: message.role,
        content: message.content,
        created_at: message.created_at,
    }
}
