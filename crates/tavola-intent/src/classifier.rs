use tavola_types::{Intent, ThreadSnapshot};

use crate::patterns;

/// Stateless rule-table classifier.
///
/// Rules are priority-ordered and the first match wins:
///
/// 1. Collection-creation phrasing → `CollectionCreate`, whether or not
///    the thread holds cached results. An empty result cache makes the
///    intent unsatisfiable downstream, never a silent downgrade.
/// 2. Explicit food/cuisine/location terms with no back-reference
///    language → `Search`.
/// 3. Back-reference language against a non-empty message log →
///    `FollowUp`.
/// 4. Help or greeting phrasing → `Help`.
/// 5. Anything else → `Unknown`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, view: &ThreadSnapshot, raw_text: &str) -> Intent {
        let text = raw_text.trim();
        if text.is_empty() {
            return Intent::Unknown;
        }

        if patterns::is_collection_request(text) {
            return Intent::CollectionCreate;
        }

        let back_reference = patterns::has_back_reference(text);

        if !back_reference && patterns::has_search_terms(text) {
            return Intent::Search;
        }

        if back_reference && view.has_history() {
            return Intent::FollowUp;
        }

        if patterns::is_help_or_greeting(text) {
            return Intent::Help;
        }

        Intent::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tavola_types::{Message, RestaurantRecord, SearchSnapshot};

    fn classifier() -> IntentClassifier {
        IntentClassifier::new()
    }

    fn empty_thread() -> ThreadSnapshot {
        ThreadSnapshot::default()
    }

    fn thread_with_history() -> ThreadSnapshot {
        ThreadSnapshot {
            messages: vec![
                Message::user("best italian in Delhi"),
                Message::assistant("Found 3 places."),
            ],
            ..Default::default()
        }
    }

    fn thread_with_results() -> ThreadSnapshot {
        let mut view = thread_with_history();
        view.search = Some(SearchSnapshot::new(
            "best italian",
            Some("Delhi".to_string()),
            vec![
                RestaurantRecord::new("r1", "Trattoria"),
                RestaurantRecord::new("r2", "La Piazza"),
            ],
        ));
        view
    }

    // ---- CollectionCreate ----

    #[test]
    fn collection_with_results() {
        let intent = classifier().classify(&thread_with_results(), "create a collection called Favorites");
        assert_eq!(intent, Intent::CollectionCreate);
    }

    #[test]
    fn collection_without_results_still_classifies() {
        // Emptiness is surfaced by the assembler, not here.
        let intent = classifier().classify(&empty_thread(), "create a collection from these");
        assert_eq!(intent, Intent::CollectionCreate);
    }

    #[test]
    fn collection_beats_search_terms() {
        let intent = classifier().classify(
            &thread_with_results(),
            "save these italian restaurants as a collection",
        );
        assert_eq!(intent, Intent::CollectionCreate);
    }

    #[test]
    fn save_these_is_collection_not_follow_up() {
        let intent = classifier().classify(&thread_with_results(), "save these for me");
        assert_eq!(intent, Intent::CollectionCreate);
    }

    // ---- Search ----

    #[test]
    fn explicit_search_regardless_of_history() {
        for view in [empty_thread(), thread_with_history(), thread_with_results()] {
            let intent = classifier().classify(&view, "best Italian restaurants in Delhi");
            assert_eq!(intent, Intent::Search);
        }
    }

    #[test]
    fn food_craving_is_search() {
        assert_eq!(
            classifier().classify(&empty_thread(), "butter chicken near me"),
            Intent::Search
        );
    }

    #[test]
    fn search_term_with_back_reference_is_not_search() {
        let intent = classifier().classify(&thread_with_history(), "what about dessert places?");
        assert_ne!(intent, Intent::Search);
    }

    // ---- FollowUp ----

    #[test]
    fn back_reference_with_history_is_follow_up() {
        let intent = classifier().classify(&thread_with_history(), "what about dessert places?");
        assert_eq!(intent, Intent::FollowUp);
    }

    #[test]
    fn more_with_history_is_follow_up() {
        assert_eq!(
            classifier().classify(&thread_with_history(), "show me more"),
            Intent::FollowUp
        );
    }

    #[test]
    fn back_reference_on_fresh_thread_falls_through() {
        // No history to refer back to: never FollowUp.
        let intent = classifier().classify(&empty_thread(), "what about dessert places?");
        assert_eq!(intent, Intent::Unknown);
    }

    // ---- Help ----

    #[test]
    fn greeting_is_help() {
        assert_eq!(classifier().classify(&empty_thread(), "hi there"), Intent::Help);
    }

    #[test]
    fn help_request_is_help() {
        assert_eq!(
            classifier().classify(&empty_thread(), "can you help me out"),
            Intent::Help
        );
    }

    // ---- Unknown ----

    #[test]
    fn unrelated_text_is_unknown() {
        assert_eq!(
            classifier().classify(&empty_thread(), "what's the weather like"),
            Intent::Unknown
        );
    }

    #[test]
    fn blank_text_is_unknown() {
        assert_eq!(classifier().classify(&empty_thread(), "   "), Intent::Unknown);
    }

    #[test]
    fn case_insensitive_classification() {
        assert_eq!(
            classifier().classify(&thread_with_results(), "CREATE A COLLECTION"),
            Intent::CollectionCreate
        );
        assert_eq!(
            classifier().classify(&empty_thread(), "BEST PIZZA IN ROME"),
            Intent::Search
        );
    }
}
