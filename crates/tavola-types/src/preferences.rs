use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Keys a preference detector may write. Each detector owns exactly one
/// key, so a false positive can never corrupt an unrelated preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferenceKey {
    Cuisine,
    Budget,
    Location,
}

impl PreferenceKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceKey::Cuisine => "cuisine",
            PreferenceKey::Budget => "budget",
            PreferenceKey::Location => "location",
        }
    }
}

/// Preferences inferred from user messages, last-write-wins per key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferenceSet {
    entries: BTreeMap<PreferenceKey, String>,
}

impl PreferenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: PreferenceKey, value: impl Into<String>) {
        self.entries.insert(key, value.into());
    }

    pub fn get(&self, key: PreferenceKey) -> Option<&str> {
        self.entries.get(&key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PreferenceKey, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// One-line-per-key rendering used in model context.
    pub fn render_summary(&self) -> String {
        if self.entries.is_empty() {
            return "No learned preferences.".to_string();
        }
        self.entries
            .iter()
            .map(|(k, v)| format!("- {}: {}", k.as_str(), v))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
