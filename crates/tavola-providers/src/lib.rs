//! Collaborator boundary.
//!
//! The engine consumes three external systems through narrow traits:
//! the restaurant search provider, the collection-persistence provider,
//! and the language model. All three are opaque and may fail; the HTTP
//! implementations here are thin reqwest clients.

pub mod error;
pub mod traits;
pub mod search;
pub mod collections;
pub mod completion;

pub use error::{ProviderError, Result};
pub use traits::{CollectionStore, CompletionClient, RestaurantSearch};
pub use search::HttpSearchClient;
pub use collections::HttpCollectionClient;
pub use completion::HttpCompletionClient;
