//! Study application: persisted library, AI card generation and review sessions
//! on top of `flashai-core`.

pub mod config;
pub mod db;
pub mod generator;
pub mod logging;
pub mod session;
pub mod store;

use anyhow::Context;

pub use config::Config;
pub use db::{DbError, KeyValueStore, MemoryStore, SqliteStore};
pub use generator::{ContentGenerator, GeminiClient, GeneratedCard, GenerationError, GenerationRequest};
pub use session::{ReviewOutcome, Session, SessionError, SessionSummary};
pub use store::{CardStore, TopicStatsStore};

/// Open a session over the configured on-disk library with the Gemini generator.
pub fn open_default() -> anyhow::Result<Session<SqliteStore, GeminiClient>> {
    logging::init();
    let config = Config::from_env();

    tracing::info!(path = %config.db_path.display(), "opening library");
    let store = SqliteStore::open(&config.db_path)
        .with_context(|| format!("failed to open library at {}", config.db_path.display()))?;

    let generator =
        GeminiClient::from_config(&config).context("GEMINI_API_KEY (or API_KEY) must be set")?;

    Ok(Session::new(store, generator).with_session_limit(config.session_limit))
}
