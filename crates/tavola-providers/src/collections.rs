use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use crate::error::{ProviderError, Result};
use crate::traits::CollectionStore;

/// HTTP client for the collection-persistence provider.
pub struct HttpCollectionClient {
    http_client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct CreateCollectionResponse {
    collection_id: String,
}

impl HttpCollectionClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ProviderError::Request)?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl CollectionStore for HttpCollectionClient {
    async fn create_collection(
        &self,
        name: &str,
        restaurant_ids: &[String],
        auth_token: Option<&str>,
    ) -> Result<String> {
        let token = auth_token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ProviderError::Auth("missing auth token".to_string()))?;

        let url = format!("{}/collections", self.base_url);
        let payload = json!({
            "name": name,
            "restaurant_ids": restaurant_ids,
            "is_public": true,
            "tags": ["user_created", "restaurant_search"],
        });

        tracing::debug!(name, count = restaurant_ids.len(), "creating collection");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Auth(body));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: CreateCollectionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        tracing::info!(name, collection_id = %payload.collection_id, "collection created");
        Ok(payload.collection_id)
    }
}
