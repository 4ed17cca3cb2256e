use async_trait::async_trait;

use tavola_types::{ContextPayload, RestaurantRecord};

use crate::error::Result;

/// External restaurant search provider.
#[async_trait]
pub trait RestaurantSearch: Send + Sync {
    /// Search for restaurants. Result ordering is the provider's and is
    /// preserved all the way to the user.
    async fn search(
        &self,
        query: &str,
        location: Option<&str>,
    ) -> Result<Vec<RestaurantRecord>>;
}

/// External collection-persistence provider.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Persist a named collection of restaurant ids. Fails with
    /// [`ProviderError::Auth`](crate::ProviderError::Auth) when the
    /// token is missing or rejected.
    async fn create_collection(
        &self,
        name: &str,
        restaurant_ids: &[String],
        auth_token: Option<&str>,
    ) -> Result<String>;
}

/// Language-model completion. Non-deterministic and allowed to fail or
/// time out; the engine treats any failure as the model being
/// unavailable for this turn.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str, context: &ContextPayload) -> Result<String>;
}
