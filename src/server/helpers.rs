//! Boundary encode/decode helpers shared by the handlers.

use crate::libs::errors::TaskError;
use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::Response;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::error;

/// Decodes a JSON request body into a command.
///
/// An empty body is a distinct failure from malformed JSON: the caller
/// supplies the command-specific "no parameters" error for it.
pub fn decode_body<T: DeserializeOwned>(body: &Bytes, empty_error: TaskError) -> Result<T, TaskError> {
    if body.is_empty() {
        return Err(empty_error);
    }
    serde_json::from_slice(body).map_err(|e| TaskError::MalformedBody(e.to_string()))
}

/// 200 with a JSON-encoded payload.
pub fn json_response<T: Serialize>(payload: &T) -> Response {
    match serde_json::to_vec(payload) {
        Ok(body) => json(StatusCode::OK, body),
        Err(e) => {
            error!("failed to encode response body: {e}");
            empty(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Maps a [`TaskError`] to its status code and error body.
///
/// Client-visible errors answer `{"error": "<message>"}`; storage failures
/// answer an empty 500, keeping driver detail out of responses.
pub fn error_response(err: &TaskError) -> Response {
    let status = err.status();
    if !err.client_visible() {
        return empty(status);
    }
    let body = serde_json::json!({ "error": err.to_string() });
    match serde_json::to_vec(&body) {
        Ok(bytes) => json(status, bytes),
        Err(_) => empty(status),
    }
}

/// 200 with no body (delete success).
pub fn ok_empty() -> Response {
    empty(StatusCode::OK)
}

fn json(status: StatusCode, body: Vec<u8>) -> Response {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap_or_default()
}

fn empty(status: StatusCode) -> Response {
    Response::builder().status(status).body(Body::empty()).unwrap_or_default()
}
