use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tavola_types::{
    Message, MessageRole, PreferenceSet, RestaurantRecord, SearchSnapshot, ThreadSnapshot,
};

use crate::detectors;
use crate::store::ThreadStore;

/// Number of past searches remembered per thread (queries and counts
/// only; old result sets are not retained).
const SEARCH_HISTORY_CAP: usize = 10;

/// A past search, kept for context summaries and stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHistoryEntry {
    pub query: String,
    pub result_count: usize,
    pub at: DateTime<Utc>,
}

/// Per-thread memory statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryStats {
    pub message_count: usize,
    pub search_count: usize,
    pub has_results: bool,
    pub preference_count: usize,
}

/// New search results to cache during a turn's write-back.
#[derive(Debug, Clone)]
pub struct SearchUpdate {
    pub query: String,
    pub location: Option<String>,
    pub results: Vec<RestaurantRecord>,
}

/// Everything a completed turn writes into its thread. Applied in one
/// critical section so a concurrent reader sees either none of it or
/// all of it.
#[derive(Debug, Clone)]
pub struct TurnWriteBack {
    pub user_text: String,
    pub assistant_text: String,
    pub search: Option<SearchUpdate>,
}

/// Flat facade over the four per-thread memory concerns: message log,
/// search-snapshot slot, preference set, and thread lifecycle.
pub struct ThreadMemory {
    store: Arc<ThreadStore>,
}

impl ThreadMemory {
    pub fn new() -> Self {
        Self {
            store: Arc::new(ThreadStore::new()),
        }
    }

    pub fn store(&self) -> &Arc<ThreadStore> {
        &self.store
    }

    pub fn exists(&self, thread_id: &str) -> bool {
        self.store.exists(thread_id)
    }

    pub fn clear(&self, thread_id: &str) {
        self.store.clear(thread_id);
    }

    /// Append a message to the thread's log. Always succeeds; content
    /// is never validated.
    pub fn append(&self, thread_id: &str, role: MessageRole, content: impl Into<String>) {
        let handle = self.store.get_or_create(thread_id);
        handle.with_state_mut(|state| state.messages.push(Message::new(role, content)));
    }

    /// Full message history in append order, as an owned copy.
    pub fn history(&self, thread_id: &str) -> Vec<Message> {
        match self.store.get(thread_id) {
            Some(handle) => handle.with_state(|state| state.messages.clone()),
            None => Vec::new(),
        }
    }

    /// Replace the thread's cached search results unconditionally and
    /// record the query in the capped search history.
    pub fn set_snapshot(
        &self,
        thread_id: &str,
        query: impl Into<String>,
        location: Option<String>,
        results: Vec<RestaurantRecord>,
    ) {
        let handle = self.store.get_or_create(thread_id);
        handle.with_state_mut(|state| {
            apply_search(state, query.into(), location, results);
        });
    }

    pub fn get_snapshot(&self, thread_id: &str) -> Option<SearchSnapshot> {
        self.store
            .get(thread_id)
            .and_then(|handle| handle.with_state(|state| state.search.clone()))
    }

    /// Cached result ids in the order the user was shown them.
    pub fn result_ids(&self, thread_id: &str) -> Vec<String> {
        self.get_snapshot(thread_id)
            .map(|s| s.result_ids())
            .unwrap_or_default()
    }

    /// Run the preference detectors over a user message and upsert any
    /// matches. Unmatched text changes nothing.
    pub fn observe(&self, thread_id: &str, user_text: &str) {
        let handle = self.store.get_or_create(thread_id);
        handle.with_state_mut(|state| observe_into(&mut state.preferences, user_text));
    }

    pub fn preferences(&self, thread_id: &str) -> PreferenceSet {
        self.store
            .get(thread_id)
            .map(|handle| handle.with_state(|state| state.preferences.clone()))
            .unwrap_or_default()
    }

    /// Consistent point-in-time view for classification and assembly.
    pub fn snapshot_view(&self, thread_id: &str) -> ThreadSnapshot {
        self.store.get_or_create(thread_id).snapshot_view()
    }

    /// Apply a completed turn atomically: preference observation, both
    /// messages, and the optional new search snapshot land under one
    /// write lock. Failed turns never reach this point, so thread state
    /// only ever records completed turns.
    pub fn commit_turn(&self, thread_id: &str, write_back: TurnWriteBack) {
        let handle = self.store.get_or_create(thread_id);
        handle.with_state_mut(|state| {
            observe_into(&mut state.preferences, &write_back.user_text);
            state.messages.push(Message::user(write_back.user_text));
            state.messages.push(Message::assistant(write_back.assistant_text));
            if let Some(update) = write_back.search {
                apply_search(state, update.query, update.location, update.results);
            }
        });
        tracing::debug!(thread_id, "turn committed");
    }

    pub fn stats(&self, thread_id: &str) -> MemoryStats {
        match self.store.get(thread_id) {
            Some(handle) => handle.with_state(|state| MemoryStats {
                message_count: state.messages.len(),
                search_count: state.searches.len(),
                has_results: state.search.as_ref().is_some_and(|s| !s.is_empty()),
                preference_count: state.preferences.len(),
            }),
            None => MemoryStats {
                message_count: 0,
                search_count: 0,
                has_results: false,
                preference_count: 0,
            },
        }
    }

    pub fn search_history(&self, thread_id: &str) -> Vec<SearchHistoryEntry> {
        match self.store.get(thread_id) {
            Some(handle) => handle.with_state(|state| state.searches.clone()),
            None => Vec::new(),
        }
    }
}

impl Default for ThreadMemory {
    fn default() -> Self {
        Self::new()
    }
}

fn observe_into(preferences: &mut PreferenceSet, user_text: &str) {
    for (key, value) in detectors::detect(user_text) {
        tracing::debug!(key = key.as_str(), value = %value, "learned preference");
        preferences.set(key, value);
    }
}

fn apply_search(
    state: &mut crate::store::ThreadState,
    query: String,
    location: Option<String>,
    results: Vec<RestaurantRecord>,
) {
    state.searches.push(SearchHistoryEntry {
        query: query.clone(),
        result_count: results.len(),
        at: Utc::now(),
    });
    if state.searches.len() > SEARCH_HISTORY_CAP {
        let excess = state.searches.len() - SEARCH_HISTORY_CAP;
        state.searches.drain(0..excess);
    }
    state.search = Some(SearchSnapshot::new(query, location, results));
}
