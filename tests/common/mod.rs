#![allow(dead_code)]

use async_trait::async_trait;
use path_redirector::application::services::{AuthService, RuleCache, RuleCacheConfig};
use path_redirector::domain::entities::{RedirectKind, RedirectRule, RuleTable};
use path_redirector::domain::repositories::{RuleSource, SourceError};
use path_redirector::infrastructure::sources::StaticRuleSource;
use path_redirector::state::AppState;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

pub const ADMIN_TOKEN: &str = "test-admin-token";

pub fn sample_rules() -> RuleTable {
    RuleTable::new(vec![
        RedirectRule::exact("/about-us", "/about", RedirectKind::Permanent),
        RedirectRule::relative("/old", "/new", RedirectKind::Permanent),
        RedirectRule::relative("/blog", "https://blog.example.com", RedirectKind::Temporary),
        RedirectRule::exact("/a/b", "/c", RedirectKind::Temporary),
    ])
}

pub fn create_cache(source: Arc<dyn RuleSource>) -> RuleCache {
    RuleCache::new(source, RuleCacheConfig::default())
}

pub fn create_test_state(source: Arc<dyn RuleSource>) -> AppState {
    AppState::new(
        create_cache(source),
        Some(Arc::new(AuthService::new(ADMIN_TOKEN))),
    )
}

/// State backed by [`sample_rules`], already loaded.
pub async fn loaded_state() -> AppState {
    let state = create_test_state(Arc::new(StaticRuleSource::new(sample_rules())));
    state.rule_cache.refresh().await.unwrap();
    state
}

/// Polls until the cache has no refresh in flight.
pub async fn wait_for_refresh(cache: &RuleCache) {
    for _ in 0..200 {
        if !cache.is_refreshing() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("refresh did not finish in time");
}

/// Source that replays a scripted sequence of results.
///
/// Once the script is exhausted every fetch fails.
pub struct ScriptedSource {
    script: Mutex<VecDeque<Result<RuleTable, SourceError>>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(script: Vec<Result<RuleTable, SourceError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RuleSource for ScriptedSource {
    async fn fetch_rules(&self) -> Result<RuleTable, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(SourceError::Http("script exhausted".to_string())))
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}

/// Source whose fetch waits until the test opens the gate.
pub struct GatedSource {
    pub gate: Arc<Notify>,
    table: RuleTable,
    calls: AtomicUsize,
}

impl GatedSource {
    pub fn new(table: RuleTable) -> Self {
        Self {
            gate: Arc::new(Notify::new()),
            table,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RuleSource for GatedSource {
    async fn fetch_rules(&self) -> Result<RuleTable, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        Ok(self.table.clone())
    }

    fn describe(&self) -> String {
        "gated".to_string()
    }
}

/// Source that never answers.
pub struct HangingSource;

#[async_trait]
impl RuleSource for HangingSource {
    async fn fetch_rules(&self) -> Result<RuleTable, SourceError> {
        std::future::pending().await
    }

    fn describe(&self) -> String {
        "hanging".to_string()
    }
}
