//! Card library and topic statistics persisted in a key-value store.

pub mod cards;
pub mod topics;

pub use cards::{CardStore, LIBRARY_NAMESPACE};
pub use topics::{TopicStatsStore, STATS_NAMESPACE};
