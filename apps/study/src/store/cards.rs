//! Card library persistence.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use flashai_core::selection::{due_cards, interleave};
use flashai_core::Card;
use rand::Rng;

use crate::db::{DbError, KeyValueStore};

/// Namespace holding the card array.
pub const LIBRARY_NAMESPACE: &str = "flashai_library_v1";

/// The persisted card collection, keyed by card id on write.
pub struct CardStore<S> {
    kv: Arc<S>,
}

impl<S> Clone for CardStore<S> {
    fn clone(&self) -> Self {
        Self {
            kv: Arc::clone(&self.kv),
        }
    }
}

impl<S: KeyValueStore> CardStore<S> {
    pub fn new(kv: Arc<S>) -> Self {
        Self { kv }
    }

    /// Every persisted card. A missing record is an empty library; a corrupt
    /// one is an error.
    pub fn load(&self) -> Result<Vec<Card>, DbError> {
        match self.kv.get(LIBRARY_NAMESPACE)? {
            Some(payload) => Ok(serde_json::from_str(&payload)?),
            None => Ok(Vec::new()),
        }
    }

    /// Every persisted card, falling back to an empty library when the
    /// record cannot be read.
    pub fn load_all(&self) -> Vec<Card> {
        self.load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "card library unreadable, treating it as empty");
            Vec::new()
        })
    }

    /// Library to merge a write into. A corrupt record is replaced by a fresh
    /// library; any other read failure aborts the write.
    fn load_for_write(&self) -> Result<Vec<Card>, DbError> {
        match self.load() {
            Err(DbError::Json(err)) => {
                tracing::warn!(error = %err, "card library is corrupt, starting a new one");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Insert cards with unseen ids and replace existing ones in place.
    ///
    /// Nothing is written when the current library cannot be read.
    pub fn upsert_many(&self, cards: &[Card]) -> Result<(), DbError> {
        let mut library = self.load_for_write()?;
        let mut positions: HashMap<String, usize> = library
            .iter()
            .enumerate()
            .map(|(index, card)| (card.id.clone(), index))
            .collect();

        let mut inserted = 0usize;
        for card in cards {
            match positions.get(&card.id) {
                Some(&index) => library[index] = card.clone(),
                None => {
                    positions.insert(card.id.clone(), library.len());
                    library.push(card.clone());
                    inserted += 1;
                }
            }
        }

        self.kv
            .put(LIBRARY_NAMESPACE, &serde_json::to_string(&library)?)?;
        tracing::debug!(
            inserted,
            updated = cards.len() - inserted,
            total = library.len(),
            "saved cards to library"
        );
        Ok(())
    }

    /// Number of cards in the library.
    pub fn count(&self) -> usize {
        self.load_all().len()
    }

    /// Cards due at `now`.
    pub fn due(&self, now: DateTime<Utc>) -> Vec<Card> {
        due_cards(&self.load_all(), now)
    }

    /// Up to `limit` due cards from every topic in uniformly random order.
    pub fn interleaved<R>(&self, limit: usize, now: DateTime<Utc>, rng: &mut R) -> Vec<Card>
    where
        R: Rng + ?Sized,
    {
        interleave(self.due(now), limit, rng)
    }
}
