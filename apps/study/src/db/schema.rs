//! SQLite schema definitions.

/// Current schema version, stored in `PRAGMA user_version`.
pub const SCHEMA_VERSION: i32 = 1;

/// Every namespace is one JSON document.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS kv_records (
    namespace TEXT PRIMARY KEY,
    payload TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;
