//! Due-set selection and interleaving.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::Card;

/// Default size of an interleaved review session.
pub const DEFAULT_SESSION_LIMIT: usize = 20;

/// Cards whose next review is unset or not after `now`.
pub fn due_cards<'a, I>(cards: I, now: DateTime<Utc>) -> Vec<Card>
where
    I: IntoIterator<Item = &'a Card>,
{
    cards
        .into_iter()
        .filter(|card| card.is_due(now))
        .cloned()
        .collect()
}

/// Uniformly shuffle `due` across all topics and keep the first `limit`.
///
/// The permutation is a Fisher-Yates shuffle, so every card is equally likely
/// to land in any position before truncation.
pub fn interleave<R>(mut due: Vec<Card>, limit: usize, rng: &mut R) -> Vec<Card>
where
    R: Rng + ?Sized,
{
    due.shuffle(rng);
    due.truncate(limit);
    due
}
