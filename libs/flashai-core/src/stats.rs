//! Per-topic rating counters.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Rating;

/// Normalise a topic label into its statistics key (trimmed, lowercase).
pub fn normalize_topic(topic: &str) -> String {
    topic.trim().to_lowercase()
}

/// Rating counters for one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TopicStat {
    pub easy: u64,
    pub good: u64,
    pub hard: u64,
    /// Reviews rated `again`.
    pub wrong: u64,
    pub total_answered: u64,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_accessed: DateTime<Utc>,
}

impl Default for TopicStat {
    fn default() -> Self {
        Self {
            easy: 0,
            good: 0,
            hard: 0,
            wrong: 0,
            total_answered: 0,
            last_accessed: DateTime::<Utc>::default(),
        }
    }
}

impl TopicStat {
    /// Count one review.
    pub fn record(&mut self, rating: Rating, now: DateTime<Utc>) {
        match rating {
            Rating::Again => self.wrong += 1,
            Rating::Hard => self.hard += 1,
            Rating::Good => self.good += 1,
            Rating::Easy => self.easy += 1,
        }
        self.total_answered += 1;
        self.last_accessed = now;
    }

    fn absorb(&mut self, other: &TopicStat) {
        self.easy += other.easy;
        self.good += other.good;
        self.hard += other.hard;
        self.wrong += other.wrong;
        self.total_answered += other.total_answered;
        self.last_accessed = self.last_accessed.max(other.last_accessed);
    }
}

/// Topic statistics keyed by normalised topic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicStats {
    topics: BTreeMap<String, TopicStat>,
}

impl TopicStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a review for `topic`, creating its counters on first use.
    pub fn record(&mut self, topic: &str, rating: Rating, now: DateTime<Utc>) -> &TopicStat {
        let stat = self.topics.entry(normalize_topic(topic)).or_default();
        stat.record(rating, now);
        stat
    }

    /// Counters for `topic`, zeroed if it was never reviewed.
    pub fn get(&self, topic: &str) -> TopicStat {
        self.topics
            .get(&normalize_topic(topic))
            .cloned()
            .unwrap_or_default()
    }

    /// Sum of every topic's counters; `last_accessed` is the most recent one.
    pub fn global(&self) -> TopicStat {
        self.topics
            .values()
            .fold(TopicStat::default(), |mut acc, stat| {
                acc.absorb(stat);
                acc
            })
    }

    /// Up to `limit` topic keys, most answered first. Ties keep key order.
    pub fn top(&self, limit: usize) -> Vec<&str> {
        let mut keys: Vec<(&str, u64)> = self
            .topics
            .iter()
            .map(|(key, stat)| (key.as_str(), stat.total_answered))
            .collect();
        // Stable sort: equal totals stay in ascending key order.
        keys.sort_by(|a, b| b.1.cmp(&a.1));
        keys.into_iter().take(limit).map(|(key, _)| key).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TopicStat)> {
        self.topics.iter().map(|(key, stat)| (key.as_str(), stat))
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}
