use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;

use tavola_types::RestaurantRecord;

use crate::error::{ProviderError, Result};
use crate::traits::RestaurantSearch;

/// HTTP client for the restaurant search provider.
pub struct HttpSearchClient {
    http_client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    restaurants: Vec<RestaurantRecord>,
}

impl HttpSearchClient {
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
impl RestaurantSearch for HttpSearchClient {
    async fn search(
        &self,
        query: &str,
        location: Option<&str>,
    ) -> Result<Vec<RestaurantRecord>> {
        let url = format!("{}/search", self.base_url);
        let mut params = vec![("query", query)];
        if let Some(location) = location {
            params.push(("location", location));
        }

        tracing::debug!(query, ?location, "searching restaurants");

        let response = self.http_client.get(&url).query(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: SearchResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        tracing::debug!(count = payload.restaurants.len(), "search returned");
        Ok(payload.restaurants)
    }
}
