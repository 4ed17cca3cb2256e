use serde::{Deserialize, Serialize};

use crate::intent::Intent;
use crate::message::Message;
use crate::preferences::PreferenceSet;
use crate::snapshot::SearchSnapshot;

/// Marker used in place of a search-context rendering when the thread
/// has no cached results.
pub const EMPTY_SEARCH_CONTEXT: &str = "No previous restaurant search.";

/// A read-only view of one thread's state, taken at a single point in
/// time. Classification and context assembly for a turn both run
/// against the same snapshot, so neither can observe a half-updated
/// thread.
#[derive(Debug, Clone, Default)]
pub struct ThreadSnapshot {
    pub messages: Vec<Message>,
    pub search: Option<SearchSnapshot>,
    pub preferences: PreferenceSet,
}

impl ThreadSnapshot {
    pub fn has_history(&self) -> bool {
        !self.messages.is_empty()
    }

    pub fn has_results(&self) -> bool {
        self.search.as_ref().is_some_and(|s| !s.is_empty())
    }
}

/// The model-facing context assembled for one turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextPayload {
    /// Last K messages, oldest first.
    pub recent_history: Vec<Message>,
    pub preference_summary: String,
    pub search_context: String,
    pub intent: Intent,
    /// Cached result ids, in the order the user was shown them. Only
    /// populated for `CollectionCreate`.
    pub collection_candidate_ids: Vec<String>,
    /// Set when the intent is `CollectionCreate` but there are no
    /// cached results to attach. The caller must surface a user-visible
    /// message instead of invoking the collection store.
    pub unsatisfiable: bool,
}

impl ContextPayload {
    /// Render the payload as the context block handed to the completion
    /// collaborator.
    pub fn render(&self) -> String {
        let mut sections = Vec::new();

        if !self.recent_history.is_empty() {
            let lines: Vec<String> = self
                .recent_history
                .iter()
                .map(|m| format!("{}: {}", m.role.as_str(), truncate(&m.content, 100)))
                .collect();
            sections.push(format!("Recent Conversation:\n{}", lines.join("\n")));
        }

        if !self.preference_summary.is_empty() {
            sections.push(format!("Learned Preferences:\n{}", self.preference_summary));
        }

        sections.push(format!("Previous Search:\n{}", self.search_context));

        if self.intent == Intent::CollectionCreate && !self.collection_candidate_ids.is_empty() {
            sections.push(format!(
                "Collection Candidates ({}):\n{}",
                self.collection_candidate_ids.len(),
                self.collection_candidate_ids.join(", ")
            ));
        }

        if sections.is_empty() {
            "No previous context available.".to_string()
        } else {
            sections.join("\n\n")
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}
