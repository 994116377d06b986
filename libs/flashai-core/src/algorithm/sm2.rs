//! SM-2 spaced repetition algorithm.
//!
//! SuperMemo 2 ease update with fixed first and second success intervals.
//! A lapse resets the card to an interval of zero, so it is due again
//! immediately; re-queueing it within the current session is the caller's job.

use super::{due_after, SpacedRepetitionAlgorithm};
use crate::types::{Card, Rating, ReviewState, DEFAULT_EASE_FACTOR};
use chrono::{DateTime, Utc};

/// Intervals in days for a successful review, by rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuccessIntervals {
    pub hard: u32,
    pub good: u32,
    pub easy: u32,
}

impl SuccessIntervals {
    fn days(&self, rating: Rating) -> u32 {
        match rating {
            // Lapses never consult the table.
            Rating::Again => 0,
            Rating::Hard => self.hard,
            Rating::Good => self.good,
            Rating::Easy => self.easy,
        }
    }
}

/// SM-2 algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    /// First success since the last lapse (or ever).
    pub first_success: SuccessIntervals,
    /// Second consecutive success.
    pub second_success: SuccessIntervals,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: DEFAULT_EASE_FACTOR,
            minimum_ease: 1.3,
            first_success: SuccessIntervals {
                hard: 1,
                good: 3,
                easy: 7,
            },
            second_success: SuccessIntervals {
                hard: 3,
                good: 6,
                easy: 14,
            },
        }
    }
}

impl SpacedRepetitionAlgorithm for Sm2 {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn initial_state(&self) -> ReviewState {
        ReviewState {
            ease_factor: self.initial_ease,
            ..ReviewState::default()
        }
    }

    fn schedule(&self, card: &Card, rating: Rating, now: DateTime<Utc>) -> Card {
        let current = &card.state;

        let (repetition, interval) = if rating.is_lapse() {
            (0, 0)
        } else {
            let interval = match current.repetition {
                0 => self.first_success.days(rating),
                1 => self.second_success.days(rating),
                _ => (f64::from(current.interval) * current.ease_factor).round() as u32,
            };
            (current.repetition.saturating_add(1), interval)
        };

        Card {
            state: ReviewState {
                repetition,
                interval,
                ease_factor: self.next_ease(current.ease_factor, rating),
                next_review: Some(due_after(now, interval)),
            },
            ..card.clone()
        }
    }
}

impl Sm2 {
    /// EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)), floored at `minimum_ease`.
    ///
    /// Applied on every review, lapses included.
    pub fn next_ease(&self, ease_factor: f64, rating: Rating) -> f64 {
        let miss = f64::from(5 - rating.quality());
        let next = ease_factor + (0.1 - miss * (0.08 + miss * 0.02));
        next.max(self.minimum_ease)
    }
}
