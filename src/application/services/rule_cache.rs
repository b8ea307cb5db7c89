//! Stale-while-revalidate cache for the redirect rule table.

use crate::domain::entities::RuleTable;
use crate::domain::repositories::{RuleSource, SourceError};
use arc_swap::ArcSwap;
use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Tuning knobs for [`RuleCache`].
#[derive(Debug, Clone)]
pub struct RuleCacheConfig {
    /// Maximum age of the table before a refresh is triggered.
    pub freshness_window: TimeDelta,
    /// Upper bound on a single fetch from the rule source.
    pub fetch_timeout: Duration,
}

impl Default for RuleCacheConfig {
    fn default() -> Self {
        Self {
            freshness_window: TimeDelta::minutes(5),
            fetch_timeout: Duration::from_secs(10),
        }
    }
}

/// Table and fetch timestamp, always published together.
#[derive(Debug, Clone, Default)]
pub struct CacheSnapshot {
    /// Last table fetched successfully, if any.
    pub table: Option<Arc<RuleTable>>,
    /// Time of the last fetch attempt, successful or not.
    pub last_fetched_at: Option<DateTime<Utc>>,
}

impl CacheSnapshot {
    /// Returns true if no table was ever fetched or the last fetch is older
    /// than `window`.
    pub fn is_stale(&self, now: DateTime<Utc>, window: TimeDelta) -> bool {
        match (&self.table, self.last_fetched_at) {
            (Some(_), Some(fetched_at)) => now - fetched_at > window,
            _ => true,
        }
    }
}

/// Process-wide cache of the redirect rule table.
///
/// Reads never block and never perform I/O: [`RuleCache::snapshot`] is a
/// single atomic pointer load. Refreshes fetch from the [`RuleSource`] into a
/// local value first, then publish table and timestamp together with one
/// pointer swap inside a short critical section. A failed fetch keeps the
/// previous table but still advances the timestamp, so a broken source is
/// retried once per freshness window rather than on every request.
///
/// Cloning is cheap; all clones share the same state.
///
/// # Example
///
/// ```rust,ignore
/// let cache = RuleCache::new(Arc::new(FileRuleSource::new("data/redirects.json")), RuleCacheConfig::default());
///
/// if cache.is_stale(Utc::now()) {
///     cache.trigger_refresh();
/// }
/// let table = cache.snapshot();
/// ```
#[derive(Clone)]
pub struct RuleCache {
    inner: Arc<Inner>,
}

struct Inner {
    source: Arc<dyn RuleSource>,
    config: RuleCacheConfig,
    state: ArcSwap<CacheSnapshot>,
    publish_lock: Mutex<()>,
    refresh_in_flight: AtomicBool,
}

impl RuleCache {
    /// Creates an empty cache; nothing is fetched until the first refresh.
    pub fn new(source: Arc<dyn RuleSource>, config: RuleCacheConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                config,
                state: ArcSwap::from_pointee(CacheSnapshot::default()),
                publish_lock: Mutex::new(()),
                refresh_in_flight: AtomicBool::new(false),
            }),
        }
    }

    /// Current rule table, or `None` if no fetch has ever succeeded.
    pub fn snapshot(&self) -> Option<Arc<RuleTable>> {
        self.inner.state.load().table.clone()
    }

    /// Current table together with the time it was last refreshed.
    pub fn state(&self) -> Arc<CacheSnapshot> {
        self.inner.state.load_full()
    }

    pub fn config(&self) -> &RuleCacheConfig {
        &self.inner.config
    }

    /// Description of the underlying rule source.
    pub fn source_description(&self) -> String {
        self.inner.source.describe()
    }

    /// Returns true when a refresh is due at `now`.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        self.inner
            .state
            .load()
            .is_stale(now, self.inner.config.freshness_window)
    }

    /// Returns true while a triggered background refresh is running.
    pub fn is_refreshing(&self) -> bool {
        self.inner.refresh_in_flight.load(Ordering::Acquire)
    }

    /// Starts a background refresh and returns immediately.
    ///
    /// At most one triggered refresh runs at a time; calls made while one is
    /// in flight return `false` without doing anything. The spawned task is
    /// never awaited and its errors are only logged.
    ///
    /// Returns `true` if a refresh task was spawned.
    pub fn trigger_refresh(&self) -> bool {
        if self
            .inner
            .refresh_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Rule refresh already in flight");
            return false;
        }

        let guard = InFlightGuard(self.inner.clone());

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("No async runtime available, rule refresh skipped");
            return false;
        };

        let cache = self.clone();
        handle.spawn(async move {
            let _guard = guard;
            // Errors are logged inside refresh()
            let _ = cache.refresh().await;
        });

        true
    }

    /// Fetches the rule table and publishes the result.
    ///
    /// On success the new table replaces the old one. On failure the previous
    /// table is kept. In both cases the fetch timestamp is advanced.
    ///
    /// # Errors
    ///
    /// Returns the [`SourceError`] of a failed fetch, including
    /// [`SourceError::Timeout`] when the source exceeds the configured
    /// fetch timeout. The cache state is already updated when this returns.
    pub async fn refresh(&self) -> Result<usize, SourceError> {
        let timeout = self.inner.config.fetch_timeout;

        let fetched = match tokio::time::timeout(timeout, self.inner.source.fetch_rules()).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout(timeout)),
        };

        match fetched {
            Ok(table) => {
                let count = table.len();
                debug!(rules = ?table.rules(), "Fetched redirect rules");
                let previous = self.publish(Some(table)).await;
                match previous {
                    Some(at) => info!(
                        rules = count,
                        since_previous = %format_elapsed(Utc::now() - at),
                        "Redirect rules updated"
                    ),
                    None => info!(rules = count, "Redirect rules loaded"),
                }
                Ok(count)
            }
            Err(e) => {
                error!(
                    source = %self.inner.source.describe(),
                    error = %e,
                    "Failed to fetch redirect rules, keeping previous table"
                );
                self.publish(None).await;
                Err(e)
            }
        }
    }

    /// Swaps in a new snapshot and returns the previous fetch time.
    ///
    /// `None` keeps the current table and only advances the timestamp.
    async fn publish(&self, table: Option<RuleTable>) -> Option<DateTime<Utc>> {
        let _lock = self.inner.publish_lock.lock().await;

        let current = self.inner.state.load_full();
        let table = match table {
            Some(table) => Some(Arc::new(table)),
            None => current.table.clone(),
        };

        self.inner.state.store(Arc::new(CacheSnapshot {
            table,
            last_fetched_at: Some(Utc::now()),
        }));

        current.last_fetched_at
    }
}

/// Clears the in-flight flag when the refresh task ends, even by panic.
struct InFlightGuard(Arc<Inner>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.refresh_in_flight.store(false, Ordering::Release);
    }
}

/// Formats a duration as `hh:mm:ss`.
fn format_elapsed(elapsed: TimeDelta) -> String {
    let secs = elapsed.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{RedirectKind, RedirectRule};
    use crate::domain::repositories::MockRuleSource;

    fn sample_table() -> RuleTable {
        RuleTable::new(vec![RedirectRule::relative(
            "/old",
            "/new",
            RedirectKind::Permanent,
        )])
    }

    fn cache_with(mock: MockRuleSource) -> RuleCache {
        RuleCache::new(Arc::new(mock), RuleCacheConfig::default())
    }

    #[test]
    fn test_empty_snapshot_is_stale() {
        let snapshot = CacheSnapshot::default();
        assert!(snapshot.is_stale(Utc::now(), TimeDelta::minutes(5)));
    }

    #[test]
    fn test_fresh_snapshot_is_not_stale() {
        let now = Utc::now();
        let snapshot = CacheSnapshot {
            table: Some(Arc::new(sample_table())),
            last_fetched_at: Some(now),
        };

        for window in [
            TimeDelta::milliseconds(1),
            TimeDelta::minutes(5),
            TimeDelta::days(1),
        ] {
            assert!(!snapshot.is_stale(now, window));
        }
    }

    #[test]
    fn test_old_snapshot_is_stale() {
        let now = Utc::now();
        let window = TimeDelta::minutes(5);
        let snapshot = CacheSnapshot {
            table: Some(Arc::new(sample_table())),
            last_fetched_at: Some(now - window * 2),
        };

        assert!(snapshot.is_stale(now, window));
    }

    #[test]
    fn test_snapshot_without_table_is_stale_after_failed_fetch() {
        let now = Utc::now();
        let snapshot = CacheSnapshot {
            table: None,
            last_fetched_at: Some(now),
        };

        assert!(snapshot.is_stale(now, TimeDelta::minutes(5)));
    }

    #[test]
    fn test_new_cache_is_empty_and_stale() {
        let cache = cache_with(MockRuleSource::new());

        assert!(cache.snapshot().is_none());
        assert!(cache.state().last_fetched_at.is_none());
        assert!(cache.is_stale(Utc::now()));
        assert!(!cache.is_refreshing());
    }

    #[tokio::test]
    async fn test_refresh_publishes_table() {
        let mut mock = MockRuleSource::new();
        mock.expect_fetch_rules()
            .times(1)
            .returning(|| Ok(sample_table()));

        let cache = cache_with(mock);
        let count = cache.refresh().await.unwrap();

        assert_eq!(count, 1);
        assert_eq!(cache.snapshot().as_deref(), Some(&sample_table()));
        assert!(!cache.is_stale(Utc::now()));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_table() {
        let mut mock = MockRuleSource::new();
        let mut calls = 0;
        mock.expect_fetch_rules().times(2).returning(move || {
            calls += 1;
            if calls == 1 {
                Ok(sample_table())
            } else {
                Err(SourceError::Http("connection refused".to_string()))
            }
        });
        mock.expect_describe().returning(|| "mock".to_string());

        let cache = cache_with(mock);
        cache.refresh().await.unwrap();
        let first_fetch = cache.state().last_fetched_at.unwrap();

        tokio::time::sleep(Duration::from_millis(5)).await;
        let result = cache.refresh().await;

        assert!(matches!(result, Err(SourceError::Http(_))));
        assert_eq!(cache.snapshot().as_deref(), Some(&sample_table()));
        assert!(cache.state().last_fetched_at.unwrap() > first_fetch);
    }

    #[tokio::test]
    async fn test_failed_first_refresh_leaves_cache_empty() {
        let mut mock = MockRuleSource::new();
        mock.expect_fetch_rules()
            .returning(|| Err(SourceError::EmptyPayload));
        mock.expect_describe().returning(|| "mock".to_string());

        let cache = cache_with(mock);
        assert!(cache.refresh().await.is_err());

        assert!(cache.snapshot().is_none());
        assert!(cache.state().last_fetched_at.is_some());
        assert!(cache.is_stale(Utc::now()));
    }

    #[tokio::test]
    async fn test_refresh_replaces_table_wholesale() {
        let mut mock = MockRuleSource::new();
        let mut calls = 0;
        mock.expect_fetch_rules().returning(move || {
            calls += 1;
            if calls == 1 {
                Ok(sample_table())
            } else {
                Ok(RuleTable::new(vec![RedirectRule::exact(
                    "/a",
                    "/b",
                    RedirectKind::Temporary,
                )]))
            }
        });

        let cache = cache_with(mock);
        cache.refresh().await.unwrap();
        let before = cache.snapshot().unwrap();

        cache.refresh().await.unwrap();
        let after = cache.snapshot().unwrap();

        // Readers holding the old snapshot keep a consistent view
        assert_eq!(*before, sample_table());
        assert_eq!(after.rules()[0].match_path, "/a");
        assert_eq!(after.len(), 1);
    }

    #[tokio::test]
    async fn test_trigger_refresh_runs_in_background() {
        let mut mock = MockRuleSource::new();
        mock.expect_fetch_rules()
            .times(1)
            .returning(|| Ok(sample_table()));

        let cache = cache_with(mock);
        assert!(cache.trigger_refresh());

        for _ in 0..100 {
            if !cache.is_refreshing() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        assert!(!cache.is_refreshing());
        assert_eq!(cache.snapshot().as_deref(), Some(&sample_table()));
    }

    #[test]
    fn test_trigger_refresh_without_runtime() {
        let cache = cache_with(MockRuleSource::new());

        assert!(!cache.trigger_refresh());
        assert!(!cache.is_refreshing());
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(TimeDelta::seconds(0)), "00:00:00");
        assert_eq!(format_elapsed(TimeDelta::seconds(3725)), "01:02:05");
        assert_eq!(format_elapsed(TimeDelta::seconds(-5)), "00:00:00");
    }
}
