//! Spaced repetition scheduling.

pub mod sm2;

use crate::mastery::points_for_interval;
use crate::types::{Card, Rating, ReviewState};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Trait for spaced repetition algorithms.
///
/// Implementations are pure: the review time is passed in, nothing is read
/// from the environment.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Scheduling state of a card that has never been reviewed.
    fn initial_state(&self) -> ReviewState;

    /// Compute the card that results from reviewing `card` with `rating` at `now`.
    fn schedule(&self, card: &Card, rating: Rating, now: DateTime<Utc>) -> Card;
}

/// What a rating would do to a card, shown before the rating is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingPreview {
    pub rating: Rating,
    pub interval: u32,
    pub points: u32,
}

/// Preview the interval and mastery points every rating would yield.
pub fn preview<A>(algorithm: &A, card: &Card, now: DateTime<Utc>) -> [RatingPreview; 4]
where
    A: SpacedRepetitionAlgorithm + ?Sized,
{
    Rating::ALL.map(|rating| {
        let interval = algorithm.schedule(card, rating, now).state.interval;
        RatingPreview {
            rating,
            interval,
            points: points_for_interval(interval),
        }
    })
}

/// Due date `interval` days after `now`, saturating at the latest representable instant.
pub(crate) fn due_after(now: DateTime<Utc>, interval: u32) -> DateTime<Utc> {
    now.checked_add_signed(Duration::days(i64::from(interval)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
