use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::restaurant::RestaurantRecord;

/// The most recent search result set cached for a thread, together with
/// the query that produced it.
///
/// At most one snapshot is live per thread: a new search replaces the
/// previous one wholesale. Result ordering is the ordering the user was
/// shown, and backward references like "save these" refer to all of it
/// in that order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSnapshot {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub results: Vec<RestaurantRecord>,
    pub captured_at: DateTime<Utc>,
}

impl SearchSnapshot {
    pub fn new(
        query: impl Into<String>,
        location: Option<String>,
        results: Vec<RestaurantRecord>,
    ) -> Self {
        Self {
            query: query.into(),
            location,
            results,
            captured_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Result ids in cached order, no dedup.
    pub fn result_ids(&self) -> Vec<String> {
        self.results.iter().map(|r| r.id.clone()).collect()
    }
}
