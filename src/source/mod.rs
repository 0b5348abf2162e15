//! Boundary to wherever the raw records come from. Everything past this point
//! works on in-memory values.
//!
//! The cache only pays off for a caller that keeps one `ResponseCache` across
//! several loads. The CLI runs a single load per process, so it always starts
//! cold and every kind is read from its source.

mod cache;
mod file;

pub use cache::{default_ttl, ResponseCache};
pub use file::JsonFileSource;

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};
use serde_json::Value;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Reports,
    Commits,
    PullRequests,
}

impl RecordKind {
    pub fn cache_key(self) -> &'static str {
        match self {
            Self::Reports => "reports",
            Self::Commits => "commits",
            Self::PullRequests => "pull_requests",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reports => write!(f, "reports"),
            Self::Commits => write!(f, "commits"),
            Self::PullRequests => write!(f, "pull requests"),
        }
    }
}

#[async_trait]
pub trait RecordSource: Sync {
    /// Raw JSON for one kind of record, normally an array.
    async fn fetch(&self, kind: RecordKind) -> Result<Value>;
}

/// Raw, not yet normalized, inputs of one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct RawInputs {
    pub reports: Value,
    pub commits: Value,
    pub pull_requests: Value,
}

/// Returns the cached value while it is fresh. Otherwise fetches and caches;
/// when the fetch fails a stale cached value is preferred over the error.
pub async fn fetch_with_cache<S: RecordSource + ?Sized>(
    source: &S,
    cache: &ResponseCache,
    kind: RecordKind,
    now: DateTime<Utc>,
    ttl: Duration,
) -> Result<Value> {
    let cached = cache.get(kind.cache_key()).await;
    if let Some(entry) = cached.as_ref().filter(|entry| entry.is_fresh(now, ttl)) {
        debug!("Using cached {kind}");
        return Ok(entry.value.clone());
    }

    match source.fetch(kind).await {
        Ok(value) => {
            cache.put(kind.cache_key(), value.clone(), now).await;
            Ok(value)
        }
        Err(e) => match cached {
            Some(entry) => {
                warn!(
                    "Failed to fetch {kind} ({e}), using cached copy from {}",
                    entry.timestamp
                );
                Ok(entry.value)
            }
            None => Err(e),
        },
    }
}

/// Fetches all three record kinds concurrently through the cache.
pub async fn load_inputs<S: RecordSource + ?Sized>(
    source: &S,
    cache: &ResponseCache,
    now: DateTime<Utc>,
) -> Result<RawInputs> {
    let ttl = default_ttl();
    let (reports, commits, pull_requests) = tokio::try_join!(
        fetch_with_cache(source, cache, RecordKind::Reports, now, ttl),
        fetch_with_cache(source, cache, RecordKind::Commits, now, ttl),
        fetch_with_cache(source, cache, RecordKind::PullRequests, now, ttl),
    )?;

    Ok(RawInputs {
        reports,
        commits,
        pull_requests,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LensError;
    use chrono::TimeZone;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Answers with a fixed value, or fails, and counts calls.
    struct StubSource {
        value: Option<Value>,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn returning(value: Value) -> Self {
            Self {
                value: Some(value),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                value: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RecordSource for StubSource {
        async fn fetch(&self, kind: RecordKind) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.value
                .clone()
                .ok_or_else(|| LensError::Source(format!("{kind} unavailable")))
        }
    }

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 7, 12, minute, 0).unwrap()
    }

    #[tokio::test]
    async fn test_fresh_cache_skips_source() {
        let source = StubSource::returning(json!(["new"]));
        let cache = ResponseCache::default();
        cache.put("commits", json!(["cached"]), at(0)).await;

        let value = fetch_with_cache(&source, &cache, RecordKind::Commits, at(2), default_ttl())
            .await
            .unwrap();

        assert_eq!(value, json!(["cached"]));
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_stale_cache_is_refreshed() {
        let source = StubSource::returning(json!(["new"]));
        let cache = ResponseCache::default();
        cache.put("commits", json!(["cached"]), at(0)).await;

        let value = fetch_with_cache(&source, &cache, RecordKind::Commits, at(10), default_ttl())
            .await
            .unwrap();

        assert_eq!(value, json!(["new"]));
        assert_eq!(source.calls(), 1);
        assert_eq!(cache.get("commits").await.unwrap().timestamp, at(10));
    }

    #[tokio::test]
    async fn test_failed_fetch_falls_back_to_stale_value() {
        let source = StubSource::failing();
        let cache = ResponseCache::default();
        cache.put("reports", json!(["stale"]), at(0)).await;

        let value = fetch_with_cache(&source, &cache, RecordKind::Reports, at(30), default_ttl())
            .await
            .unwrap();

        assert_eq!(value, json!(["stale"]));
        assert_eq!(cache.get("reports").await.unwrap().timestamp, at(0));
    }

    #[tokio::test]
    async fn test_failed_fetch_without_cache_is_error() {
        let source = StubSource::failing();
        let cache = ResponseCache::default();

        let err = fetch_with_cache(&source, &cache, RecordKind::PullRequests, at(0), default_ttl())
            .await
            .unwrap_err();

        assert!(matches!(err, LensError::Source(_)));
    }

    #[tokio::test]
    async fn test_load_inputs_fills_cache() {
        let source = StubSource::returning(json!([]));
        let cache = ResponseCache::default();

        let inputs = load_inputs(&source, &cache, at(0)).await.unwrap();

        assert_eq!(inputs.reports, json!([]));
        assert_eq!(source.calls(), 3);
        assert!(cache.get("reports").await.is_some());
        assert!(cache.get("commits").await.is_some());
        assert!(cache.get("pull_requests").await.is_some());

        load_inputs(&source, &cache, at(1)).await.unwrap();
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn test_shared_cache_survives_failing_reload() {
        let cache = ResponseCache::default();
        load_inputs(&StubSource::returning(json!(["first"])), &cache, at(0))
            .await
            .unwrap();

        let failing = StubSource::failing();
        let inputs = load_inputs(&failing, &cache, at(20)).await.unwrap();

        assert_eq!(failing.calls(), 3);
        assert_eq!(inputs.commits, json!(["first"]));
        assert_eq!(inputs.pull_requests, json!(["first"]));
    }

    #[test]
    fn test_record_kind_labels() {
        assert_eq!(RecordKind::PullRequests.cache_key(), "pull_requests");
        assert_eq!(RecordKind::PullRequests.to_string(), "pull requests");
    }
}
