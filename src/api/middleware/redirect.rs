//! Redirect interceptor middleware.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{error, info};

use crate::domain::matcher::{RedirectDecision, find_redirect};
use crate::state::AppState;
use crate::utils::path_normalizer::{decode_path, encode_location};

/// Redirects requests whose path matches a rule, passes everything else on.
///
/// # Request Flow
///
/// 1. If the rule table is stale, start a background refresh (not awaited)
/// 2. Take the current table snapshot; with no table loaded yet, pass through
/// 3. Match the percent-decoded request path (query string excluded)
///    against the table
/// 4. On a match respond `301`/`302` with a `Location` header and stop
/// 5. Otherwise call the next stage unchanged
///
/// The middleware never fails a request. A decision that cannot be turned
/// into a response (e.g. a target that is not a valid header value) is
/// logged and the request continues to the next stage.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/", get(index))
///     .layer(middleware::from_fn_with_state(state.clone(), redirect::layer));
/// ```
pub async fn layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    let cache = &st.rule_cache;

    if cache.is_stale(Utc::now()) {
        cache.trigger_refresh();
    }

    if let Some(table) = cache.snapshot()
        && let Some(decision) = find_redirect(&decode_path(req.uri().path()), &table)
    {
        match redirect_response(&decision) {
            Ok(response) => {
                info!(
                    path = %req.uri().path(),
                    target = %decision.target_url,
                    status = decision.status_code(),
                    "Redirected request"
                );
                return response;
            }
            Err(e) => {
                error!(
                    path = %req.uri().path(),
                    target = %decision.target_url,
                    error = %e,
                    "Failed to build redirect response, passing request through"
                );
            }
        }
    }

    next.run(req).await
}

/// Builds a `301`/`302` response pointing at the decision's target.
///
/// Non-ASCII characters and spaces in the target are percent-encoded.
///
/// # Errors
///
/// Returns an error if the target is still not a valid `Location` header
/// value, e.g. because it contains control characters.
pub fn redirect_response(decision: &RedirectDecision) -> Result<Response, axum::http::Error> {
    let status = if decision.permanent {
        StatusCode::MOVED_PERMANENTLY
    } else {
        StatusCode::FOUND
    };

    let location = encode_location(&decision.target_url);

    Response::builder()
        .status(status)
        .header(header::LOCATION, &*location)
        .body(Body::empty())
}
