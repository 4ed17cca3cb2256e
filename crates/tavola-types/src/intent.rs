use serde::{Deserialize, Serialize};

/// The classified purpose of an incoming turn.
///
/// Computed fresh per turn from the thread snapshot and the raw text;
/// never persisted as thread state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Search,
    CollectionCreate,
    FollowUp,
    Help,
    Unknown,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Search => "search",
            Intent::CollectionCreate => "collection_create",
            Intent::FollowUp => "follow_up",
            Intent::Help => "help",
            Intent::Unknown => "unknown",
        }
    }
}
