//! Rendering of login results as HTTP responses.
//!
//! Errors use the host's error body:
//!
//! ```json
//! { "errors": ["role is not found"] }
//! ```
//!
//! Provisioning failures are rendered with a generic message; their detail
//! only goes to the logs.

use http::StatusCode;
use ociauth_model::LoginOutput;
use serde::Serialize;

use crate::error::LoginError;

/// Content type of every response body.
pub const CONTENT_TYPE: &str = "application/json";

/// Header carrying the request id.
pub const REQUEST_ID_HEADER: &str = "opc-request-id";

/// Serialize a login error into a JSON error body.
#[must_use]
pub fn error_to_json(error: &LoginError) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "errors": [error.public_message()],
    }))
    .expect("JSON serialization of error cannot fail")
}

/// Convert a login error into a complete HTTP error response.
#[must_use]
pub fn error_response(error: &LoginError, request_id: &str) -> http::Response<Vec<u8>> {
    build(error.status_code(), error_to_json(error), request_id)
}

/// Build the response for a successful login.
#[must_use]
pub fn login_response(output: &LoginOutput, request_id: &str) -> http::Response<Vec<u8>> {
    build(StatusCode::OK, to_json(output), request_id)
}

/// Build the response for a resolved role.
#[must_use]
pub fn resolve_role_response(role: &str, request_id: &str) -> http::Response<Vec<u8>> {
    let body = serde_json::json!({ "data": { "role": role } });
    build(StatusCode::OK, to_json(&body), request_id)
}

fn to_json<T: Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).expect("JSON serialization of response cannot fail")
}

fn build(status: StatusCode, body: Vec<u8>, request_id: &str) -> http::Response<Vec<u8>> {
    let mut response = http::Response::builder()
        .status(status)
        .header(http::header::CONTENT_TYPE, CONTENT_TYPE)
        .body(body)
        .expect("valid response");

    if let Ok(hv) = http::HeaderValue::from_str(request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, hv);
    }

    response
}
