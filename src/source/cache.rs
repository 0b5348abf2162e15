use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tokio::sync::Mutex;

pub const DEFAULT_TTL_MINUTES: i64 = 5;

pub fn default_ttl() -> Duration {
    Duration::minutes(DEFAULT_TTL_MINUTES)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CachedEntry {
    pub value: Value,
    pub timestamp: DateTime<Utc>,
}

impl CachedEntry {
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.timestamp < ttl
    }
}

/// Last successful response per record kind. Freshness is decided by the
/// caller, so stale entries stay available as a fallback.
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CachedEntry>>,
}

impl ResponseCache {
    pub async fn get(&self, key: &str) -> Option<CachedEntry> {
        self.entries.lock().await.get(key).cloned()
    }

    pub async fn put(&self, key: impl Into<String>, value: Value, timestamp: DateTime<Utc>) {
        self.entries
            .lock()
            .await
            .insert(key.into(), CachedEntry { value, timestamp });
    }
}
