//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check: rule cache status (public)
//! - `/api/*`            - Admin API (Bearer token required, mounted only
//!   when an admin token is configured)
//! - everything else     - 404 fallback
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging (outermost)
//! - **Redirect** - Rule-based redirect interceptor, runs before routing so
//!   it sees every request including unmatched ones
//! - **Authentication** - Bearer token on `/api/*`

use crate::api;
use crate::api::handlers::{fallback_handler, health_handler};
use crate::api::middleware::{auth, redirect, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
pub fn app_router(state: AppState) -> Router {
    let mut router = Router::new().route("/health", get(health_handler));

    if state.auth_service.is_some() {
        let api_router = api::routes::protected_routes()
            .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
        router = router.nest("/api", api_router);
    }

    router
        .fallback(fallback_handler)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            redirect::layer,
        ))
        .with_state(state)
        .layer(tracing::layer())
}
