//! In-process key-value store for tests and throwaway sessions.

use crate::db::error::DbError;
use crate::db::repository::KeyValueStore;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Entries are replaced whole, so a poisoned map is still consistent.
    fn records(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, namespace: &str) -> Result<Option<String>, DbError> {
        let records = self.records();
        Ok(records.get(namespace).cloned())
    }

    fn put(&self, namespace: &str, payload: &str) -> Result<(), DbError> {
        let mut records = self.records();
        records.insert(namespace.to_string(), payload.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn survives_poisoned_lock() {
        let store = Arc::new(MemoryStore::new());
        store.put("library", "[]").unwrap();

        let poisoner = Arc::clone(&store);
        let _ = thread::spawn(move || {
            let _guard = poisoner.records.lock().unwrap();
            panic!("writer crashed");
        })
        .join();

        assert!(store.records.is_poisoned());
        assert_eq!(store.get("library").unwrap().as_deref(), Some("[]"));
        store.put("library", "[1]").unwrap();
        assert_eq!(store.get("library").unwrap().as_deref(), Some("[1]"));
    }
}
