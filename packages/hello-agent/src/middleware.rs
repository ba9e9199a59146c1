//! Request correlation, proxy-header normalization, CORS and panic handling.

use axum::extract::Request;
use axum::http::header::HOST;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::any::Any;
use tower_http::cors::{AllowOrigin, Any as AnyOrigin, CorsLayer};
use tracing::error;

use crate::Config;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Propagate or generate `x-request-id` for end-to-end correlation.
pub async fn inject_request_id(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(generate_request_id);

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    if let Ok(val) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, val);
    }

    response
}

fn generate_request_id() -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    format!("agt-{:016x}", rng.gen::<u64>())
}

/// Request correlation ID, extractable from `Request::extensions()`.
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Client view of a request as reported by the fronting proxy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ForwardedInfo {
    pub client_ip: Option<String>,
    pub proto: Option<String>,
    pub host: Option<String>,
}

/// Parse `X-Forwarded-*`, trusting exactly one proxy hop: the rightmost
/// entry of each header is the one our proxy appended.
pub fn parse_forwarded(headers: &HeaderMap) -> ForwardedInfo {
    ForwardedInfo {
        client_ip: last_hop(headers, "x-forwarded-for"),
        proto: last_hop(headers, "x-forwarded-proto").map(|p| p.to_ascii_lowercase()),
        host: last_hop(headers, "x-forwarded-host"),
    }
}

fn last_hop(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(name)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .last()
        .map(String::from)
}

/// Record forwarded client info as a request extension and restore the
/// original `Host`.
pub async fn normalize_forwarded_headers(mut request: Request, next: Next) -> Response {
    let info = parse_forwarded(request.headers());

    if let Some(host) = info.host.as_deref() {
        if let Ok(val) = HeaderValue::from_str(host) {
            request.headers_mut().insert(HOST, val);
        }
    }

    request.extensions_mut().insert(info);
    next.run(request).await
}

/// CORS policy from `cors_allowed_origins`; `*` or empty allows any origin.
pub fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins()
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin)
}

/// 500 body for a handler panic.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(panic = %detail, "Handler panicked");

    let body = serde_json::json!({ "error": "Internal server error" });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
}

/// Give the timeout layer's empty 408 the same JSON shape as other errors.
pub async fn json_timeout_body(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }
    let body = serde_json::json!({ "error": "Request timed out" });
    (StatusCode::REQUEST_TIMEOUT, axum::Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwarded_trusts_last_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );
        headers.insert("x-forwarded-proto", HeaderValue::from_static("HTTPS"));
        headers.insert("x-forwarded-host", HeaderValue::from_static("agent.example"));

        let info = parse_forwarded(&headers);
        assert_eq!(info.client_ip.as_deref(), Some("10.0.0.1"));
        assert_eq!(info.proto.as_deref(), Some("https"));
        assert_eq!(info.host.as_deref(), Some("agent.example"));
    }

    #[test]
    fn test_forwarded_absent() {
        assert_eq!(parse_forwarded(&HeaderMap::new()), ForwardedInfo::default());
    }

    #[test]
    fn test_generated_request_id_format() {
        let id = generate_request_id();
        assert!(id.starts_with("agt-"));
        assert_eq!(id.len(), 4 + 16);
    }

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_panic_response_is_json_500() {
        let resp = panic_response(Box::new("boom"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(resp).await,
            serde_json::json!({"error": "Internal server error"})
        );
    }

    #[tokio::test]
    async fn test_timeout_gets_json_body() {
        let timed_out = StatusCode::REQUEST_TIMEOUT.into_response();
        let resp = json_timeout_body(timed_out).await;
        assert_eq!(resp.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            body_json(resp).await,
            serde_json::json!({"error": "Request timed out"})
        );
    }

    #[tokio::test]
    async fn test_other_statuses_pass_through() {
        let resp = json_timeout_body(StatusCode::NO_CONTENT.into_response()).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }
}
