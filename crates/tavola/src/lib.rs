//! # Tavola
//!
//! Conversational front-end over an external restaurant-search service:
//! per-thread conversation memory, deterministic intent routing, and
//! model-facing context assembly.
//!
//! ## Overview
//!
//! Tavola accepts natural-language turns and decides whether each turn
//! is a new search, a follow-up about the last results, or a request to
//! persist those results into a named collection. The language model,
//! the restaurant search provider, and the collection store are opaque
//! collaborators consumed through narrow traits.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tavola::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = Engine::builder()
//!         .search(Arc::new(HttpSearchClient::new("http://localhost:9000")?))
//!         .collections(Arc::new(HttpCollectionClient::new("http://localhost:9000")?))
//!         .completion(Arc::new(HttpCompletionClient::new(
//!             std::env::var("OPENAI_API_KEY")?,
//!             "gpt-4o-mini",
//!         )?))
//!         .build()?;
//!
//!     let outcome = engine
//!         .process_turn(None, "best butter chicken in Delhi", None, None)
//!         .await?;
//!
//!     println!("[{}] {}", outcome.intent.as_str(), outcome.message);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! Tavola is organized into focused crates:
//!
//! - **`tavola-types`**: shared domain types
//! - **`tavola-memory`**: thread-scoped in-memory conversation state
//! - **`tavola-intent`**: deterministic intent classification
//! - **`tavola-providers`**: collaborator traits and HTTP clients
//! - **`tavola-engine`**: context assembly and turn orchestration

pub mod prelude;

pub use tavola_types::{
    ContextPayload, Intent, Message, MessageRole, PreferenceKey, PreferenceSet, RestaurantRecord,
    SearchSnapshot, ThreadSnapshot,
};

pub use tavola_memory::{
    MemoryStats, SearchHistoryEntry, SearchUpdate, ThreadMemory, ThreadStore, TurnWriteBack,
};

pub use tavola_intent::IntentClassifier;

pub use tavola_providers::{
    CollectionStore, CompletionClient, HttpCollectionClient, HttpCompletionClient,
    HttpSearchClient, ProviderError, RestaurantSearch,
};

pub use tavola_engine::{
    ContextAssembler, Engine, EngineBuilder, EngineConfig, EngineError, TurnOutcome,
};
