use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

use crate::suggestions::models::Suggestion;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("redis: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Holds suggestion batches between `/ai/enhance` and `/ai/apply`.
#[async_trait]
pub trait SuggestionStore: Send + Sync {
    async fn put(&self, session_id: Uuid, suggestions: Vec<Suggestion>) -> Result<(), StoreError>;

    /// `None` for unknown and expired sessions alike.
    async fn get(&self, session_id: Uuid) -> Result<Option<Vec<Suggestion>>, StoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// In-process backend
// ────────────────────────────────────────────────────────────────────────────

struct Entry {
    expires_at: Instant,
    suggestions: Vec<Suggestion>,
}

pub struct InMemorySuggestionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<Uuid, Entry>>,
}

impl InMemorySuggestionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl SuggestionStore for InMemorySuggestionStore {
    async fn put(&self, session_id: Uuid, suggestions: Vec<Suggestion>) -> Result<(), StoreError> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, entry| entry.expires_at > now);
        if sessions.len() < before {
            debug!(purged = before - sessions.len(), "Purged expired suggestion batches");
        }

        sessions.insert(
            session_id,
            Entry {
                expires_at: now + self.ttl,
                suggestions,
            },
        );
        Ok(())
    }

    async fn get(&self, session_id: Uuid) -> Result<Option<Vec<Suggestion>>, StoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(&session_id)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.suggestions.clone()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Redis backend
// ────────────────────────────────────────────────────────────────────────────

/// JSON batches under `suggestions:<id>`; Redis expires them.
pub struct RedisSuggestionStore {
    client: redis::Client,
    ttl: Duration,
}

impl RedisSuggestionStore {
    pub fn new(client: redis::Client, ttl: Duration) -> Self {
        Self { client, ttl }
    }
}

fn redis_key(session_id: Uuid) -> String {
    format!("suggestions:{session_id}")
}

#[async_trait]
impl SuggestionStore for RedisSuggestionStore {
    async fn put(&self, session_id: Uuid, suggestions: Vec<Suggestion>) -> Result<(), StoreError> {
        let json = serde_json::to_string(&suggestions)?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        redis::cmd("SET")
            .arg(redis_key(session_id))
            .arg(json)
            .arg("EX")
            .arg(self.ttl.as_secs().max(1))
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn get(&self, session_id: Uuid) -> Result<Option<Vec<Suggestion>>, StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json: Option<String> = redis::cmd("GET")
            .arg(redis_key(session_id))
            .query_async(&mut conn)
            .await?;
        json.map(|j| serde_json::from_str(&j))
            .transpose()
            .map_err(StoreError::from)
    }
}
