use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use serde::Serialize;
use uuid::Uuid;

use tavola_intent::{patterns, IntentClassifier};
use tavola_memory::{detectors, SearchUpdate, ThreadMemory, TurnWriteBack};
use tavola_providers::{
    CollectionStore, CompletionClient, ProviderError, RestaurantSearch,
};
use tavola_types::{ContextPayload, Intent, PreferenceKey, RestaurantRecord, ThreadSnapshot};

use crate::assembler::{render_search_context, ContextAssembler, DEFAULT_HISTORY_WINDOW};
use crate::error::{map_provider, EngineError};
use crate::naming::derive_collection_name;
use crate::prompts;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Messages included in the model-facing context window.
    pub history_window: usize,
    /// Budget for one completion call before the turn is abandoned.
    pub completion_timeout: Duration,
    /// Search location used when neither the request, the text, nor the
    /// thread's preferences name one.
    pub default_location: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_window: DEFAULT_HISTORY_WINDOW,
            completion_timeout: Duration::from_secs(20),
            default_location: None,
        }
    }
}

/// The result of one processed turn.
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub thread_id: String,
    pub intent: Intent,
    pub message: String,
    pub restaurants: Vec<RestaurantRecord>,
}

/// The conversation engine: classifies a turn against a consistent
/// thread snapshot, assembles context, drives the collaborators, and
/// writes the completed turn back atomically.
///
/// No thread lock is ever held across a collaborator await: the
/// snapshot read and the write-back are the only critical sections, so
/// a slow downstream call cannot block other turns.
pub struct Engine {
    memory: Arc<ThreadMemory>,
    search: Arc<dyn RestaurantSearch>,
    collections: Arc<dyn CollectionStore>,
    completion: Arc<dyn CompletionClient>,
    classifier: IntentClassifier,
    assembler: ContextAssembler,
    config: EngineConfig,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub fn memory(&self) -> &Arc<ThreadMemory> {
        &self.memory
    }

    /// Process one conversational turn.
    ///
    /// A missing thread id starts a fresh thread. Failed turns commit
    /// nothing: thread state only ever reflects completed turns.
    pub async fn process_turn(
        &self,
        thread_id: Option<String>,
        raw_text: &str,
        location: Option<String>,
        auth_token: Option<&str>,
    ) -> Result<TurnOutcome, EngineError> {
        let thread_id = thread_id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let text = raw_text.trim();

        // Empty input is recovered locally with a help prompt and no
        // memory write.
        if text.is_empty() {
            return Ok(TurnOutcome {
                thread_id,
                intent: Intent::Help,
                message: prompts::HELP_TEXT.to_string(),
                restaurants: Vec::new(),
            });
        }

        let view = self.memory.snapshot_view(&thread_id);
        let intent = self.classifier.classify(&view, text);
        let payload = self.assembler.assemble(&view, intent);

        tracing::info!(%thread_id, intent = intent.as_str(), "turn classified");

        match intent {
            Intent::CollectionCreate if payload.unsatisfiable => {
                self.record_turn(&thread_id, text, prompts::NOTHING_TO_SAVE);
                Ok(TurnOutcome {
                    thread_id,
                    intent,
                    message: prompts::NOTHING_TO_SAVE.to_string(),
                    restaurants: Vec::new(),
                })
            }
            Intent::CollectionCreate => {
                self.handle_collection(thread_id, text, auth_token, &view, payload)
                    .await
            }
            Intent::Search => {
                self.handle_search(thread_id, text, location, &view, payload)
                    .await
            }
            Intent::Help => {
                self.record_turn(&thread_id, text, prompts::HELP_TEXT);
                Ok(TurnOutcome {
                    thread_id,
                    intent,
                    message: prompts::HELP_TEXT.to_string(),
                    restaurants: Vec::new(),
                })
            }
            Intent::FollowUp | Intent::Unknown => {
                let reply = self.complete_with_timeout(text, &payload).await?;
                self.record_turn(&thread_id, text, &reply);
                Ok(TurnOutcome {
                    thread_id,
                    intent,
                    message: reply,
                    restaurants: Vec::new(),
                })
            }
        }
    }

    async fn handle_search(
        &self,
        thread_id: String,
        text: &str,
        location: Option<String>,
        view: &ThreadSnapshot,
        mut payload: ContextPayload,
    ) -> Result<TurnOutcome, EngineError> {
        let location = location
            .or_else(|| detectors::extract_location(text))
            .or_else(|| view.preferences.get(PreferenceKey::Location).map(str::to_string))
            .or_else(|| self.config.default_location.clone());

        let results = self.search_with_retry(text, location.as_deref()).await?;

        // The model sees the fresh results, not the previous snapshot.
        let fresh = tavola_types::SearchSnapshot::new(text, location.clone(), results.clone());
        payload.search_context = render_search_context(&fresh);

        let reply = self.complete_with_timeout(text, &payload).await?;

        self.memory.commit_turn(
            &thread_id,
            TurnWriteBack {
                user_text: text.to_string(),
                assistant_text: reply.clone(),
                search: Some(SearchUpdate {
                    query: text.to_string(),
                    location,
                    results: results.clone(),
                }),
            },
        );

        Ok(TurnOutcome {
            thread_id,
            intent: Intent::Search,
            message: reply,
            restaurants: results,
        })
    }

    async fn handle_collection(
        &self,
        thread_id: String,
        text: &str,
        auth_token: Option<&str>,
        view: &ThreadSnapshot,
        payload: ContextPayload,
    ) -> Result<TurnOutcome, EngineError> {
        let token = auth_token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| EngineError::Auth("collection creation requires an auth token".to_string()))?;

        let name = patterns::extract_requested_name(text)
            .unwrap_or_else(|| derive_collection_name(view));
        let ids = payload.collection_candidate_ids.clone();

        // Never retried: a second attempt could create a duplicate
        // collection.
        let collection_id = self
            .collections
            .create_collection(&name, &ids, Some(token))
            .await
            .map_err(map_provider)?;

        let message = format!(
            "Created collection \"{}\" with {} restaurants (id: {}).",
            name,
            ids.len(),
            collection_id
        );

        self.record_turn(&thread_id, text, &message);

        let restaurants = view
            .search
            .as_ref()
            .map(|s| s.results.clone())
            .unwrap_or_default();

        Ok(TurnOutcome {
            thread_id,
            intent: Intent::CollectionCreate,
            message,
            restaurants,
        })
    }

    /// Search with a single retry on backend failure. Auth rejections
    /// are surfaced immediately.
    async fn search_with_retry(
        &self,
        query: &str,
        location: Option<&str>,
    ) -> Result<Vec<RestaurantRecord>, EngineError> {
        match self.search.search(query, location).await {
            Ok(results) => Ok(results),
            Err(first @ ProviderError::Auth(_)) => Err(map_provider(first)),
            Err(first) => {
                tracing::warn!(error = %first, "search failed, retrying once");
                self.search
                    .search(query, location)
                    .await
                    .map_err(map_provider)
            }
        }
    }

    async fn complete_with_timeout(
        &self,
        prompt: &str,
        context: &ContextPayload,
    ) -> Result<String, EngineError> {
        match tokio::time::timeout(
            self.config.completion_timeout,
            self.completion.complete(prompt, context),
        )
        .await
        {
            Ok(Ok(reply)) => Ok(reply),
            Ok(Err(error)) => Err(EngineError::ModelUnavailable(error.to_string())),
            Err(_) => Err(EngineError::ModelUnavailable(format!(
                "completion timed out after {:?}",
                self.config.completion_timeout
            ))),
        }
    }

    fn record_turn(&self, thread_id: &str, user_text: &str, assistant_text: &str) {
        self.memory.commit_turn(
            thread_id,
            TurnWriteBack {
                user_text: user_text.to_string(),
                assistant_text: assistant_text.to_string(),
                search: None,
            },
        );
    }
}

pub struct EngineBuilder {
    memory: Option<Arc<ThreadMemory>>,
    search: Option<Arc<dyn RestaurantSearch>>,
    collections: Option<Arc<dyn CollectionStore>>,
    completion: Option<Arc<dyn CompletionClient>>,
    config: EngineConfig,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            memory: None,
            search: None,
            collections: None,
            completion: None,
            config: EngineConfig::default(),
        }
    }

    pub fn memory(mut self, memory: Arc<ThreadMemory>) -> Self {
        self.memory = Some(memory);
        self
    }

    pub fn search(mut self, search: Arc<dyn RestaurantSearch>) -> Self {
        self.search = Some(search);
        self
    }

    pub fn collections(mut self, collections: Arc<dyn CollectionStore>) -> Self {
        self.collections = Some(collections);
        self
    }

    pub fn completion(mut self, completion: Arc<dyn CompletionClient>) -> Self {
        self.completion = Some(completion);
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> anyhow::Result<Engine> {
        let memory = self.memory.unwrap_or_else(|| Arc::new(ThreadMemory::new()));
        let search = self.search.context("search provider is required")?;
        let collections = self.collections.context("collection store is required")?;
        let completion = self.completion.context("completion client is required")?;

        Ok(Engine {
            memory,
            search,
            collections,
            completion,
            classifier: IntentClassifier::new(),
            assembler: ContextAssembler::new(self.config.history_window),
            config: self.config,
        })
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
