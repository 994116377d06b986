//! Spaced repetition and mastery engine for AI-generated flashcards.
//!
//! Provides:
//! - SM-2 scheduling of cards from qualitative ratings
//! - Per-topic rating statistics
//! - Due-set selection with cross-topic interleaving
//! - Mastery score and progression tiers
//! - Shared types (Card, ReviewState, Rating, etc.)

pub mod algorithm;
pub mod error;
pub mod mastery;
pub mod selection;
pub mod stats;
pub mod types;

pub use algorithm::sm2::Sm2;
pub use algorithm::{preview, RatingPreview, SpacedRepetitionAlgorithm};
pub use error::{CoreError, Result};
pub use mastery::{level_info, points_for_interval, score, UserLevelInfo};
pub use selection::{due_cards, interleave, DEFAULT_SESSION_LIMIT};
pub use stats::{normalize_topic, TopicStat, TopicStats};
pub use types::{Card, DifficultyLevel, Rating, ReviewState, StudyMode};
