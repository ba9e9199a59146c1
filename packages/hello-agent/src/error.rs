//! Error types for the agent service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::fmt;

/// Service error type.
#[derive(Debug)]
pub enum Error {
    /// Configuration error.
    Config(String),
    /// Agent key could not be loaded.
    Identity(String),
    /// Malformed client input.
    BadRequest(String),
    /// Listener or server I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "config error: {msg}"),
            Error::Identity(msg) => write!(f, "identity error: {msg}"),
            Error::BadRequest(msg) => write!(f, "bad request: {msg}"),
            Error::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::Config(_) | Error::Identity(_) | Error::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let message = match self {
            Error::BadRequest(reason) => reason,
            other => other.to_string(),
        };
        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}

/// Failure inside the execute callback. Reported to the caller as a
/// runtime error carrying this message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    EmptyDialog,
    EmptyItem,
    NotText(String),
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentError::EmptyDialog => write!(f, "dialog has no items"),
            AgentError::EmptyItem => write!(f, "last dialog item has no blocks"),
            AgentError::NotText(kind) => write!(f, "expected a text block, got '{kind}'"),
        }
    }
}

impl std::error::Error for AgentError {}
