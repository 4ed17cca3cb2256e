use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use tavola_types::{Intent, RestaurantRecord};

use crate::{error::ApiResult, state::AppState};

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub thread_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub success: bool,
    pub intent: Intent,
    pub message: String,
    pub restaurants: Vec<RestaurantRecord>,
    pub thread_id: String,
}

/// Unified endpoint for restaurant queries and conversations: searches,
/// follow-ups with thread memory, and collection creation (which needs
/// an Authorization header).
pub async fn query(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<QueryRequest>,
) -> ApiResult<Json<QueryResponse>> {
    let auth_token = extract_bearer_token(&headers);

    let outcome = state
        .engine
        .process_turn(req.thread_id, &req.query, req.location, auth_token.as_deref())
        .await?;

    Ok(Json(QueryResponse {
        success: true,
        intent: outcome.intent,
        message: outcome.message,
        restaurants: outcome.restaurants,
        thread_id: outcome.thread_id,
    }))
}

/// Pull a token out of the Authorization header, with or without a
/// "Bearer " prefix.
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_prefix_is_stripped() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
        assert_eq!(extract_bearer_token(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn raw_token_is_accepted() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("abc123"));
        assert_eq!(extract_bearer_token(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn missing_header_is_none() {
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }
}
