//! Compiled pattern tables (compiled once, reused across calls).

use std::sync::LazyLock;

use regex::Regex;

struct PatternSet {
    collection: Vec<Regex>,
    back_reference: Vec<Regex>,
    search: Vec<Regex>,
    help: Vec<Regex>,
}

static PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| {
    let mk = |pats: &[&str]| -> Vec<Regex> {
        pats.iter()
            .map(|p| Regex::new(p).expect("invalid intent regex"))
            .collect()
    };

    PatternSet {
        // Collection-creation phrases (checked first so a save phrase
        // never routes to search).
        collection: mk(&[
            r"(?i)\b(create|make|save|build|start)\b.{0,40}\b(collection|list)\b",
            r"(?i)\b(save|add|keep)\s+(these|those|them|all\s+of\s+these)\b",
            r"(?i)\badd\b.{0,30}\bto\s+(a|my|the)\s+(collection|list)\b",
        ]),
        // Back-reference language pointing at earlier turns or results.
        back_reference: mk(&[
            r"(?i)\bwhat\s+about\b",
            r"(?i)\b(more|another|again)\b",
            r"(?i)\b(those|these|them)\b",
            r"(?i)\bsame\b",
            r"(?i)\binstead\b",
            r"(?i)\bany\s+others?\b",
        ]),
        // Explicit food / cuisine / dining / location terms.
        search: mk(&[
            r"(?i)\b(restaurants?|food|eat|eating|dining|dinner|lunch|breakfast|brunch|cafes?|coffee|desserts?|bakery|bar|street\s+food)\b",
            r"(?i)\b(pizza|sushi|burgers?|biryani|butter\s+chicken|ramen|tacos?|pasta|noodles|dumplings|kebabs?|curry)\b",
            r"(?i)\b(italian|chinese|indian|mexican|japanese|thai|korean|french|mediterranean|vietnamese|lebanese|greek|mughlai)\b",
            r"(?i)\bnear\s+me\b",
            r"(?i)\bnearby\b",
            r"(?:\bin|\bnear|\baround)\s+[A-Z][\w']*",
        ]),
        // Help requests and greetings.
        help: mk(&[
            r"(?i)^\s*(hi|hello|hey|howdy|thanks|thank\s+you)\b",
            r"(?i)\bhelp\b",
            r"(?i)\bwhat\s+can\s+you\s+do\b",
            r"(?i)\bhow\s+(do|does)\s+(you|this|it)\s+work\b",
        ]),
    }
});

// Explicit collection name: `... called "Date Night"` or `... named Date Night`.
static NAME_QUOTED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:called|named)\s+["']([^"']+)["']"#).expect("invalid name regex")
});

static NAME_BARE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:called|named)\s+(.+)$").expect("invalid name regex")
});

pub fn is_collection_request(text: &str) -> bool {
    PATTERNS.collection.iter().any(|re| re.is_match(text))
}

pub fn has_back_reference(text: &str) -> bool {
    PATTERNS.back_reference.iter().any(|re| re.is_match(text))
}

pub fn has_search_terms(text: &str) -> bool {
    PATTERNS.search.iter().any(|re| re.is_match(text))
}

pub fn is_help_or_greeting(text: &str) -> bool {
    PATTERNS.help.iter().any(|re| re.is_match(text))
}

/// Pull an explicitly requested collection name out of the turn text,
/// if the user supplied one.
pub fn extract_requested_name(text: &str) -> Option<String> {
    if let Some(caps) = NAME_QUOTED_RE.captures(text) {
        return caps.get(1).map(|m| m.as_str().trim().to_string());
    }
    NAME_BARE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| {
            m.as_str()
                .trim_end_matches(|c: char| c.is_whitespace() || matches!(c, '.' | '!' | '?'))
                .trim()
                .to_string()
        })
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_collection_matches() {
        assert!(is_collection_request("create a collection from these"));
        assert!(is_collection_request("make a list of these places"));
        assert!(is_collection_request("save a collection called Favorites"));
    }

    #[test]
    fn save_these_matches() {
        assert!(is_collection_request("save these for later"));
        assert!(is_collection_request("add them to my list"));
    }

    #[test]
    fn plain_search_is_not_collection() {
        assert!(!is_collection_request("best italian restaurants in Delhi"));
    }

    #[test]
    fn back_reference_terms() {
        assert!(has_back_reference("what about dessert places?"));
        assert!(has_back_reference("show me more"));
        assert!(has_back_reference("are those open late?"));
        assert!(has_back_reference("same but cheaper"));
    }

    #[test]
    fn no_back_reference_in_fresh_query() {
        assert!(!has_back_reference("best italian restaurants in Delhi"));
    }

    #[test]
    fn search_terms_cover_food_cuisine_location() {
        assert!(has_search_terms("best italian restaurants in Delhi"));
        assert!(has_search_terms("where can I eat ramen"));
        assert!(has_search_terms("coffee near me"));
        assert!(has_search_terms("anything in Mumbai"));
    }

    #[test]
    fn search_terms_absent_in_small_talk() {
        assert!(!has_search_terms("how was your day"));
    }

    #[test]
    fn help_and_greeting_patterns() {
        assert!(is_help_or_greeting("hello there"));
        assert!(is_help_or_greeting("can you help me"));
        assert!(is_help_or_greeting("what can you do"));
    }

    #[test]
    fn extracts_quoted_name() {
        assert_eq!(
            extract_requested_name(r#"create a collection called "Date Night Spots""#),
            Some("Date Night Spots".to_string())
        );
    }

    #[test]
    fn extracts_bare_name_and_trims_punctuation() {
        assert_eq!(
            extract_requested_name("make a collection named Weekend Eats!"),
            Some("Weekend Eats".to_string())
        );
    }

    #[test]
    fn no_name_when_not_given() {
        assert_eq!(extract_requested_name("save these"), None);
    }
}
