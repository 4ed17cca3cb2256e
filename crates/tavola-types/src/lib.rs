pub mod message;
pub mod restaurant;
pub mod snapshot;
pub mod preferences;
pub mod intent;
pub mod context;

pub use message::{Message, MessageRole};
pub use restaurant::RestaurantRecord;
pub use snapshot::SearchSnapshot;
pub use preferences::{PreferenceKey, PreferenceSet};
pub use intent::Intent;
pub use context::{ContextPayload, ThreadSnapshot, EMPTY_SEARCH_CONTEXT};
