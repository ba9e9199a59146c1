//! HTTP request handlers.

use crate::context::ExecuteContext;
use crate::error::Error;
use crate::identity::KEY_TYPE;
use crate::metrics::METRICS;
use crate::middleware::{ForwardedInfo, RequestId};
use crate::response::{ChallengeRequest, ChallengeResponse, HealthResponse, PublicKeyResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;
use theoriq_types::ExecuteRequestBody;
use tracing::{debug, info, warn};

/// Response header carrying the execution cost as JSON.
pub const COST_HEADER: &str = "x-theoriq-cost";

/// Liveness probe. The hosted variant also reports the platform URI.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        theoriq_uri: state.theoriq_uri.clone(),
    })
}

/// Prometheus metrics in text exposition format.
pub async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let body = METRICS.render(state.start_time.elapsed().as_secs());
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4",
        )],
        body,
    )
}

/// Run the registered agent callback on a dialog.
pub async fn execute(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let start = Instant::now();
    METRICS.execute_total.fetch_add(1, Ordering::Relaxed);

    // Set by middleware.
    let req_id = request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_default();
    let forwarded = request.extensions().get::<ForwardedInfo>().cloned();

    let body = match Json::<ExecuteRequestBody>::from_request(request, &state).await {
        Ok(Json(body)) => body,
        Err(e) => {
            METRICS.execute_bad_request.fetch_add(1, Ordering::Relaxed);
            warn!(req_id = %req_id, error = %e, "Invalid execute body");
            return Error::BadRequest(e.body_text()).into_response();
        }
    };

    if let Some(fwd) = forwarded {
        debug!(
            req_id = %req_id,
            client_ip = fwd.client_ip.as_deref().unwrap_or("-"),
            proto = fwd.proto.as_deref().unwrap_or("-"),
            host = fwd.host.as_deref().unwrap_or("-"),
            "Forwarded execute request"
        );
    }

    let context = ExecuteContext::new(req_id.clone(), state.identity.address(), &body);
    let result = (state.execute)(&context, &body);
    METRICS.record_execute_duration(start);

    match result {
        Ok(response) => {
            METRICS.execute_success.fetch_add(1, Ordering::Relaxed);
            info!(req_id = %req_id, cost = %response.cost, "Execute succeeded");
            let cost = serde_json::to_string(&response.cost).unwrap_or_default();
            (StatusCode::OK, [(COST_HEADER, cost)], Json(response.body)).into_response()
        }
        Err(runtime_error) => {
            METRICS
                .execute_runtime_error
                .fetch_add(1, Ordering::Relaxed);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(runtime_error)).into_response()
        }
    }
}

/// Agent public key. `GET /api/v1alpha2/system/public-key`
pub async fn public_key(State(state): State<Arc<AppState>>) -> Json<PublicKeyResponse> {
    Json(PublicKeyResponse {
        public_key: state.identity.address(),
        key_type: KEY_TYPE,
    })
}

/// Sign a caller-supplied nonce to prove key ownership.
/// `POST /api/v1alpha2/system/challenge`
pub async fn challenge(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChallengeRequest>, JsonRejection>,
) -> Result<Json<ChallengeResponse>, Error> {
    let Json(request) = payload.map_err(|e| Error::BadRequest(e.body_text()))?;

    let raw = request.nonce.trim();
    let nonce_bytes = hex::decode(raw.strip_prefix("0x").unwrap_or(raw))
        .map_err(|e| Error::BadRequest(format!("nonce is not hex: {e}")))?;
    if nonce_bytes.is_empty() {
        return Err(Error::BadRequest("nonce is empty".into()));
    }

    METRICS.challenges_signed.fetch_add(1, Ordering::Relaxed);
    Ok(Json(ChallengeResponse {
        signature: state.identity.sign(&nonce_bytes),
        nonce: request.nonce,
    }))
}

/// Fallback for unknown routes.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Not found" })),
    )
}
