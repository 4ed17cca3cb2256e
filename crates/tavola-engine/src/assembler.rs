use tavola_types::{
    ContextPayload, Intent, SearchSnapshot, ThreadSnapshot, EMPTY_SEARCH_CONTEXT,
};

pub const DEFAULT_HISTORY_WINDOW: usize = 10;

/// Composes the message log, search snapshot, and preference set into a
/// single [`ContextPayload`]. Pure: no side effects, fully determined
/// by its inputs.
#[derive(Debug, Clone, Copy)]
pub struct ContextAssembler {
    history_window: usize,
}

impl ContextAssembler {
    pub fn new(history_window: usize) -> Self {
        Self { history_window }
    }

    pub fn assemble(&self, view: &ThreadSnapshot, intent: Intent) -> ContextPayload {
        let start = view.messages.len().saturating_sub(self.history_window);
        let recent_history = view.messages[start..].to_vec();

        let search_context = match &view.search {
            Some(snapshot) => render_search_context(snapshot),
            None => EMPTY_SEARCH_CONTEXT.to_string(),
        };

        let collection_candidate_ids = if intent == Intent::CollectionCreate {
            view.search
                .as_ref()
                .map(|s| s.result_ids())
                .unwrap_or_default()
        } else {
            Vec::new()
        };

        let unsatisfiable =
            intent == Intent::CollectionCreate && collection_candidate_ids.is_empty();

        ContextPayload {
            recent_history,
            preference_summary: view.preferences.render_summary(),
            search_context,
            intent,
            collection_candidate_ids,
            unsatisfiable,
        }
    }
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_WINDOW)
    }
}

pub(crate) fn render_search_context(snapshot: &SearchSnapshot) -> String {
    let place = snapshot
        .location
        .as_ref()
        .map(|l| format!(" in {}", l))
        .unwrap_or_default();
    format!(
        "Query: {}{}\nFound {} restaurants",
        snapshot.query,
        place,
        snapshot.results.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tavola_types::{Message, RestaurantRecord};

    fn view_with_messages(n: usize) -> ThreadSnapshot {
        ThreadSnapshot {
            messages: (0..n).map(|i| Message::user(format!("message {}", i))).collect(),
            ..Default::default()
        }
    }

    fn view_with_results(ids: &[&str]) -> ThreadSnapshot {
        ThreadSnapshot {
            search: Some(SearchSnapshot::new(
                "best italian",
                Some("Delhi".to_string()),
                ids.iter().map(|id| RestaurantRecord::new(*id, format!("R {}", id))).collect(),
            )),
            ..Default::default()
        }
    }

    #[test]
    fn history_is_last_k_oldest_first() {
        let assembler = ContextAssembler::new(10);
        let payload = assembler.assemble(&view_with_messages(25), Intent::Unknown);

        assert_eq!(payload.recent_history.len(), 10);
        assert_eq!(payload.recent_history[0].content, "message 15");
        assert_eq!(payload.recent_history[9].content, "message 24");
    }

    #[test]
    fn short_history_is_kept_whole() {
        let assembler = ContextAssembler::default();
        let payload = assembler.assemble(&view_with_messages(3), Intent::Unknown);
        assert_eq!(payload.recent_history.len(), 3);
        assert_eq!(payload.recent_history[0].content, "message 0");
    }

    #[test]
    fn empty_search_uses_marker() {
        let payload = ContextAssembler::default().assemble(&view_with_messages(0), Intent::Search);
        assert_eq!(payload.search_context, EMPTY_SEARCH_CONTEXT);
    }

    #[test]
    fn search_context_renders_query_and_count() {
        let payload =
            ContextAssembler::default().assemble(&view_with_results(&["a", "b"]), Intent::FollowUp);
        assert!(payload.search_context.contains("best italian in Delhi"));
        assert!(payload.search_context.contains("Found 2 restaurants"));
    }

    #[test]
    fn candidate_ids_only_for_collection_intent() {
        let view = view_with_results(&["a", "b", "c"]);

        let search_payload = ContextAssembler::default().assemble(&view, Intent::Search);
        assert!(search_payload.collection_candidate_ids.is_empty());

        let collection_payload =
            ContextAssembler::default().assemble(&view, Intent::CollectionCreate);
        assert_eq!(collection_payload.collection_candidate_ids, vec!["a", "b", "c"]);
        assert!(!collection_payload.unsatisfiable);
    }

    #[test]
    fn collection_intent_without_results_is_unsatisfiable() {
        let payload =
            ContextAssembler::default().assemble(&view_with_messages(2), Intent::CollectionCreate);
        assert!(payload.collection_candidate_ids.is_empty());
        assert!(payload.unsatisfiable);
    }
}
