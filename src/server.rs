//! HTTP server initialization and runtime setup.
//!
//! Builds the rule source and cache, starts the initial rule fetch, and runs
//! the Axum server until a shutdown signal arrives.

use crate::application::services::{AuthService, RuleCache};
use crate::config::{Config, RuleSourceConfig};
use crate::domain::repositories::RuleSource;
use crate::infrastructure::sources::{FileRuleSource, HttpRuleSource};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use url::Url;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Rule source (HTTP or file)
/// - Rule cache, with the first fetch started in the background
/// - Admin authentication (if `ADMIN_TOKEN` is set)
/// - Axum HTTP server with graceful shutdown
///
/// The server starts accepting requests before the first fetch completes;
/// until then requests pass through without redirects.
///
/// # Errors
///
/// Returns an error if:
/// - The rule source cannot be constructed
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let source = build_source(&config)?;
    tracing::info!(source = %source.describe(), "Rule source configured");

    let rule_cache = RuleCache::new(source, config.rule_cache_config());
    rule_cache.trigger_refresh();

    let auth_service = config
        .admin_token
        .as_deref()
        .map(|token| Arc::new(AuthService::new(token)));

    let state = AppState::new(rule_cache, auth_service);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Creates the rule source described by the configuration.
///
/// # Errors
///
/// Returns an error if the rule URL does not parse or the HTTP client cannot
/// be built.
pub fn build_source(config: &Config) -> Result<Arc<dyn RuleSource>> {
    let source: Arc<dyn RuleSource> = match &config.rule_source {
        RuleSourceConfig::Http(raw) => {
            let url = Url::parse(raw).context("Invalid REDIRECT_RULES_URL")?;
            Arc::new(HttpRuleSource::new(
                url,
                config.attempt_timeout(),
                config.fetch_retries,
            )?)
        }
        RuleSourceConfig::File(path) => Arc::new(FileRuleSource::new(path.clone())),
    };

    Ok(source)
}

/// Resolves when the process receives Ctrl+C (or SIGTERM on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
