//! Runtime configuration read from the environment.

use std::path::PathBuf;

use flashai_core::DEFAULT_SESSION_LIMIT;

const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_LANGUAGE: &str = "Portuguese (Brazil)";

#[derive(Debug, Clone)]
pub struct Config {
    /// `GEMINI_API_KEY`, falling back to `API_KEY`.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub db_path: PathBuf,
    /// Cards per interleaved review session.
    pub session_limit: usize,
    /// Language the generated cards are written in.
    pub content_language: String,
}

impl Config {
    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let session_limit = match non_empty("FLASHAI_SESSION_LIMIT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "invalid FLASHAI_SESSION_LIMIT, using default");
                DEFAULT_SESSION_LIMIT
            }),
            None => DEFAULT_SESSION_LIMIT,
        };

        Self {
            gemini_api_key: non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")),
            gemini_model: non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            db_path: non_empty("FLASHAI_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(default_db_path),
            session_limit,
            content_language: non_empty("FLASHAI_CONTENT_LANGUAGE")
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        }
    }
}

fn default_db_path() -> PathBuf {
    // Use the per-user data directory, fallback to current dir
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flashai")
        .join("library.db")
}
