//! Study session: generating or selecting cards and reviewing them.
//!
//! A lapse (`again`) schedules the card for "now", so it is due again right
//! away and will show up in the next interleaved session. The session itself
//! does not re-queue it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use flashai_core::mastery::{level_info, points_for_interval, score, UserLevelInfo};
use flashai_core::{
    preview, Card, Rating, RatingPreview, SpacedRepetitionAlgorithm, Sm2, StudyMode, TopicStat,
    TopicStats, DEFAULT_SESSION_LIMIT,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::db::KeyValueStore;
use crate::generator::{into_cards, ContentGenerator, GenerationError, GenerationRequest};
use crate::store::{CardStore, TopicStatsStore};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to generate cards: {0}")]
    Generation(#[from] GenerationError),

    #[error("no cards are due for review")]
    NothingDue,

    #[error("the library is empty")]
    EmptyLibrary,

    #[error("no card is waiting for a rating")]
    NoActiveCard,
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// Rating counts for the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub easy: u32,
    pub good: u32,
    pub hard: u32,
    pub wrong: u32,
    pub elapsed_secs: i64,
}

impl SessionSummary {
    pub fn reviewed(&self) -> u32 {
        self.easy + self.good + self.hard + self.wrong
    }

    fn record(&mut self, rating: Rating) {
        match rating {
            Rating::Again => self.wrong += 1,
            Rating::Hard => self.hard += 1,
            Rating::Good => self.good += 1,
            Rating::Easy => self.easy += 1,
        }
    }
}

/// Result of rating the current card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewOutcome {
    pub card: Card,
    /// Mastery points the new interval is worth.
    pub points: u32,
    /// True once every card in the session has been rated.
    pub finished: bool,
}

/// One user's study session over a persisted library.
pub struct Session<S, G> {
    cards: CardStore<S>,
    topics: TopicStatsStore<S>,
    generator: G,
    algorithm: Sm2,
    session_limit: usize,
    queue: Vec<Card>,
    position: usize,
    mode: StudyMode,
    summary: SessionSummary,
    started_at: Option<DateTime<Utc>>,
}

impl<S: KeyValueStore, G: ContentGenerator> Session<S, G> {
    pub fn new(store: S, generator: G) -> Self {
        let store = Arc::new(store);
        Self {
            cards: CardStore::new(Arc::clone(&store)),
            topics: TopicStatsStore::new(store),
            generator,
            algorithm: Sm2::default(),
            session_limit: DEFAULT_SESSION_LIMIT,
            queue: Vec::new(),
            position: 0,
            mode: StudyMode::default(),
            summary: SessionSummary::default(),
            started_at: None,
        }
    }

    /// Cap on the number of cards in an interleaved session.
    pub fn with_session_limit(mut self, limit: usize) -> Self {
        self.session_limit = limit;
        self
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn card_store(&self) -> &CardStore<S> {
        &self.cards
    }

    pub fn topic_store(&self) -> &TopicStatsStore<S> {
        &self.topics
    }

    /// Generate new cards, save them to the library and study them.
    ///
    /// When `bidirectional` is set in flashcard mode, every card is replaced by
    /// its inverse (answer shown first).
    pub async fn start_generated(
        &mut self,
        request: GenerationRequest,
        mode: StudyMode,
        bidirectional: bool,
    ) -> Result<&[Card]> {
        request.validate()?;
        info!(
            topic = %request.topic,
            level = ?request.level,
            count = request.count,
            "generating cards"
        );

        let generated = self.generator.generate(&request).await.map_err(|err| {
            error!(error = %err, topic = %request.topic, "card generation failed");
            err
        })?;

        let mut cards = into_cards(&request.topic, generated);
        if bidirectional && mode == StudyMode::Flashcard {
            cards = cards.iter().map(Card::inverted).collect();
        }

        if let Err(err) = self.cards.upsert_many(&cards) {
            error!(error = %err, "failed to save generated cards, continuing in memory");
        }

        self.begin(cards, mode);
        Ok(&self.queue)
    }

    /// Review due cards from every topic, shuffled together.
    pub fn start_interleaved(&mut self) -> Result<&[Card]> {
        let due = self
            .cards
            .interleaved(self.session_limit, Utc::now(), &mut rand::thread_rng());
        if due.is_empty() {
            return Err(SessionError::NothingDue);
        }

        info!(count = due.len(), "starting interleaved review");
        self.begin(due, StudyMode::Flashcard);
        Ok(&self.queue)
    }

    fn begin(&mut self, cards: Vec<Card>, mode: StudyMode) {
        self.queue = cards;
        self.position = 0;
        self.mode = mode;
        self.summary = SessionSummary::default();
        self.started_at = Some(Utc::now());
    }

    /// Every card in the library.
    pub fn library(&self) -> Result<Vec<Card>> {
        let cards = self.cards.load_all();
        if cards.is_empty() {
            return Err(SessionError::EmptyLibrary);
        }
        Ok(cards)
    }

    pub fn mode(&self) -> StudyMode {
        self.mode
    }

    pub fn queue(&self) -> &[Card] {
        &self.queue
    }

    /// Cards not yet rated in this session.
    pub fn remaining(&self) -> usize {
        self.queue.len().saturating_sub(self.position)
    }

    /// The card awaiting a rating.
    pub fn current(&self) -> Option<&Card> {
        self.queue.get(self.position)
    }

    /// Interval and points each rating would give the current card.
    pub fn preview(&self) -> Option<[RatingPreview; 4]> {
        self.current()
            .map(|card| preview(&self.algorithm, card, Utc::now()))
    }

    /// Rate the current card now.
    pub fn rate(&mut self, rating: Rating) -> Result<ReviewOutcome> {
        self.rate_at(rating, Utc::now())
    }

    /// Rate the current card as of `now`: update the session counters and
    /// topic statistics, reschedule the card, save it and advance.
    ///
    /// Persistence failures are logged and do not interrupt the session.
    pub fn rate_at(&mut self, rating: Rating, now: DateTime<Utc>) -> Result<ReviewOutcome> {
        let current = self.current().cloned().ok_or(SessionError::NoActiveCard)?;

        self.summary.record(rating);

        if let Err(err) = self.topics.record_review(&current.topic, rating, now) {
            error!(error = %err, topic = %current.topic, "failed to save topic statistics");
        }

        let updated = self.algorithm.schedule(&current, rating, now);
        if let Err(err) = self.cards.upsert_many(std::slice::from_ref(&updated)) {
            error!(error = %err, card = %updated.id, "failed to save reviewed card");
        }

        if rating.is_lapse() {
            debug!(card = %updated.id, "lapse, card is due again immediately");
        }

        self.queue[self.position] = updated.clone();
        self.position += 1;

        Ok(ReviewOutcome {
            points: points_for_interval(updated.state.interval),
            finished: self.position >= self.queue.len(),
            card: updated,
        })
    }

    /// Counts for the session so far.
    pub fn summary(&self) -> SessionSummary {
        let elapsed_secs = self
            .started_at
            .map(|start| (Utc::now() - start).num_seconds())
            .unwrap_or(0);
        SessionSummary {
            elapsed_secs,
            ..self.summary.clone()
        }
    }

    pub fn topic_stats(&self) -> TopicStats {
        self.topics.get_all()
    }

    pub fn stats_for_topic(&self, topic: &str) -> TopicStat {
        self.topics.get(topic)
    }

    pub fn global_stats(&self) -> TopicStat {
        self.topics.global()
    }

    pub fn top_topics(&self, limit: usize) -> Vec<String> {
        self.topics.top(limit)
    }

    /// Mastery score over the whole library.
    pub fn score(&self) -> u64 {
        score(&self.cards.load_all())
    }

    pub fn level_info(&self) -> UserLevelInfo {
        level_info(self.score())
    }
}
