use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use tavola_types::{Message, PreferenceSet, SearchSnapshot, ThreadSnapshot};

use crate::memory::SearchHistoryEntry;

/// Owns the set of live conversation threads.
///
/// The outer map lock is held only for lookup and insert; all per-thread
/// state sits behind the thread's own lock, so two turns on distinct
/// thread identifiers never block each other. The map is unbounded for
/// the lifetime of the process; retention is the caller's concern.
pub struct ThreadStore {
    threads: RwLock<HashMap<String, Arc<ThreadHandle>>>,
}

impl ThreadStore {
    pub fn new() -> Self {
        Self {
            threads: RwLock::new(HashMap::new()),
        }
    }

    /// Get the thread for an identifier, creating it on first reference.
    /// Idempotent: one identifier maps to at most one live thread.
    pub fn get_or_create(&self, thread_id: &str) -> Arc<ThreadHandle> {
        if let Some(handle) = self.threads.read().get(thread_id) {
            return Arc::clone(handle);
        }

        let mut threads = self.threads.write();
        Arc::clone(
            threads
                .entry(thread_id.to_string())
                .or_insert_with(|| {
                    tracing::debug!(thread_id, "created thread");
                    Arc::new(ThreadHandle::new(thread_id))
                }),
        )
    }

    pub fn get(&self, thread_id: &str) -> Option<Arc<ThreadHandle>> {
        self.threads.read().get(thread_id).cloned()
    }

    pub fn exists(&self, thread_id: &str) -> bool {
        self.threads.read().contains_key(thread_id)
    }

    /// Drop a thread's history, snapshot, and preferences. The
    /// identifier stays registered and a later append succeeds.
    pub fn clear(&self, thread_id: &str) {
        if let Some(handle) = self.get(thread_id) {
            handle.clear();
            tracing::info!(thread_id, "cleared thread");
        }
    }

    pub fn thread_count(&self) -> usize {
        self.threads.read().len()
    }
}

impl Default for ThreadStore {
    fn default() -> Self {
        Self::new()
    }
}

/// One live conversation thread and its exclusively-owned state.
pub struct ThreadHandle {
    id: String,
    created_at: DateTime<Utc>,
    state: RwLock<ThreadState>,
}

#[derive(Default)]
pub(crate) struct ThreadState {
    pub messages: Vec<Message>,
    pub search: Option<SearchSnapshot>,
    pub preferences: PreferenceSet,
    pub searches: Vec<SearchHistoryEntry>,
}

impl ThreadHandle {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            created_at: Utc::now(),
            state: RwLock::new(ThreadState::default()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Consistent read of messages + snapshot + preferences under a
    /// single lock acquisition.
    pub fn snapshot_view(&self) -> ThreadSnapshot {
        let state = self.state.read();
        ThreadSnapshot {
            messages: state.messages.clone(),
            search: state.search.clone(),
            preferences: state.preferences.clone(),
        }
    }

    pub fn clear(&self) {
        let mut state = self.state.write();
        *state = ThreadState::default();
    }

    pub(crate) fn with_state<T>(&self, f: impl FnOnce(&ThreadState) -> T) -> T {
        f(&self.state.read())
    }

    pub(crate) fn with_state_mut<T>(&self, f: impl FnOnce(&mut ThreadState) -> T) -> T {
        f(&mut self.state.write())
    }
}
