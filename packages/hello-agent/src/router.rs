//! HTTP router setup.

use crate::handlers;
use crate::middleware;
use crate::state::{AppState, Variant};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Mount point of the agent protocol routes.
pub const API_PREFIX: &str = "/api/v1alpha2";

/// Create the application router.
pub fn create(state: Arc<AppState>) -> Router {
    let blueprint = Router::new()
        .route("/execute", post(handlers::execute))
        .route("/system/public-key", get(handlers::public_key))
        .route("/system/challenge", post(handlers::challenge));

    let mut app = Router::new()
        .nest(API_PREFIX, blueprint)
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .fallback(handlers::not_found);

    if state.variant == Variant::Hosted {
        app = app
            .layer(axum::middleware::from_fn(
                middleware::normalize_forwarded_headers,
            ))
            .layer(middleware::cors_layer(&state.config));
    }

    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    app.layer(CatchPanicLayer::custom(middleware::panic_response))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(axum::middleware::map_response(middleware::json_timeout_body))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(middleware::inject_request_id))
        .with_state(state)
}
