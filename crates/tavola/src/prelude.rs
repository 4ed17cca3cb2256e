//! Prelude module for convenient imports
//!
//! Import everything you need with:
//! ```rust
//! use tavola::prelude::*;
//! ```

pub use tavola_types::{
    ContextPayload, Intent, Message, MessageRole, PreferenceKey, PreferenceSet, RestaurantRecord,
    SearchSnapshot, ThreadSnapshot,
};

pub use tavola_memory::ThreadMemory;

pub use tavola_intent::IntentClassifier;

pub use tavola_providers::{
    CollectionStore, CompletionClient, HttpCollectionClient, HttpCompletionClient,
    HttpSearchClient, ProviderError, RestaurantSearch,
};

pub use tavola_engine::{Engine, EngineBuilder, EngineConfig, EngineError, TurnOutcome};
