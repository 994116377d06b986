//! Topic statistics persistence.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use flashai_core::{Rating, TopicStat, TopicStats};

use crate::db::{DbError, KeyValueStore};

/// Namespace holding the topic statistics object.
pub const STATS_NAMESPACE: &str = "flashai_topic_stats_v1";

pub struct TopicStatsStore<S> {
    kv: Arc<S>,
}

impl<S> Clone for TopicStatsStore<S> {
    fn clone(&self) -> Self {
        Self {
            kv: Arc::clone(&self.kv),
        }
    }
}

impl<S: KeyValueStore> TopicStatsStore<S> {
    pub fn new(kv: Arc<S>) -> Self {
        Self { kv }
    }

    pub fn load(&self) -> Result<TopicStats, DbError> {
        match self.kv.get(STATS_NAMESPACE)? {
            Some(payload) => Ok(serde_json::from_str(&payload)?),
            None => Ok(TopicStats::new()),
        }
    }

    /// All statistics, empty when the record cannot be read.
    pub fn get_all(&self) -> TopicStats {
        self.load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "topic statistics unreadable, treating them as empty");
            TopicStats::new()
        })
    }

    /// Statistics to merge a write into. Corrupt statistics restart from
    /// zero; any other read failure aborts the write.
    fn load_for_write(&self) -> Result<TopicStats, DbError> {
        match self.load() {
            Err(DbError::Json(err)) => {
                tracing::warn!(error = %err, "topic statistics are corrupt, starting over");
                Ok(TopicStats::new())
            }
            other => other,
        }
    }

    /// Count a review for `topic` and persist the whole map.
    ///
    /// Nothing is written when the current statistics cannot be read.
    pub fn record_review(
        &self,
        topic: &str,
        rating: Rating,
        now: DateTime<Utc>,
    ) -> Result<TopicStat, DbError> {
        let mut stats = self.load_for_write()?;
        let updated = stats.record(topic, rating, now).clone();
        self.kv
            .put(STATS_NAMESPACE, &serde_json::to_string(&stats)?)?;
        tracing::debug!(topic, %rating, total = updated.total_answered, "recorded review");
        Ok(updated)
    }

    pub fn get(&self, topic: &str) -> TopicStat {
        self.get_all().get(topic)
    }

    pub fn global(&self) -> TopicStat {
        self.get_all().global()
    }

    /// Up to `limit` most answered topic keys.
    pub fn top(&self, limit: usize) -> Vec<String> {
        self.get_all()
            .top(limit)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
