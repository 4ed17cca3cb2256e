//! Thread-scoped conversation memory.
//!
//! Every conversation thread owns a message log, one search-snapshot
//! slot, and a set of inferred preferences. State is process-lifetime
//! and in-resident; nothing is written to disk. Threads are isolated
//! behind per-thread locks so turns on unrelated threads never contend.

pub mod store;
pub mod memory;
pub mod detectors;

pub use store::{ThreadHandle, ThreadStore};
pub use memory::{MemoryStats, SearchHistoryEntry, SearchUpdate, ThreadMemory, TurnWriteBack};
