//! Shared fakes for session integration tests.

pub mod fixtures;

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use flashai_study::{
    ContentGenerator, DbError, GeneratedCard, GenerationError, GenerationRequest, KeyValueStore,
    MemoryStore,
};

/// Generator that replays a fixed answer and counts calls.
pub struct ScriptedGenerator {
    cards: Option<Vec<GeneratedCard>>,
    calls: AtomicUsize,
    last_request: Mutex<Option<GenerationRequest>>,
}

impl ScriptedGenerator {
    pub fn returning(cards: Vec<GeneratedCard>) -> Self {
        Self {
            cards: Some(cards),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Every call fails as if the API rejected the key.
    pub fn failing() -> Self {
        Self {
            cards: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

impl ContentGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedCard>, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        match &self.cards {
            Some(cards) => Ok(cards.iter().take(request.count).cloned().collect()),
            None => Err(GenerationError::Api {
                status: 403,
                message: "API key not valid".to_string(),
            }),
        }
    }
}

/// Store whose reads work but whose writes always fail.
#[derive(Default)]
pub struct ReadOnlyStore {
    inner: MemoryStore,
}

impl ReadOnlyStore {
    pub fn seeded(namespace: &str, payload: &str) -> Self {
        let inner = MemoryStore::new();
        inner.put(namespace, payload).unwrap();
        Self { inner }
    }
}

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, namespace: &str) -> Result<Option<String>, DbError> {
        self.inner.get(namespace)
    }

    fn put(&self, _namespace: &str, _payload: &str) -> Result<(), DbError> {
        Err(DbError::Io(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "read-only store",
        )))
    }
}
