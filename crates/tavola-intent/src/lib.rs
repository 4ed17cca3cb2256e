//! Intent classification.
//!
//! Maps raw turn text plus a read-only thread snapshot to an [`Intent`]
//! through a fixed, priority-ordered rule table. No model call is
//! involved: classification is deterministic so that the decision of
//! which prior results a turn refers to is never left to chance.

pub mod patterns;
pub mod classifier;

pub use classifier::IntentClassifier;
pub use patterns::extract_requested_name;

pub use tavola_types::Intent;
