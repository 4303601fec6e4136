//! JSON response helpers

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::Response,
};
use catalog_types::MessageBody;

/// Build a response carrying an already serialized JSON payload
pub fn json_response(status: StatusCode, payload: Vec<u8>) -> Response {
    let mut response = Response::new(Body::from(payload));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    *response.status_mut() = status;
    response
}

/// Build a `{"message": ...}` response
pub fn message_response(status: StatusCode, message: impl Into<String>) -> Response {
    // A struct with one string field always serializes
    let payload = serde_json::to_vec(&MessageBody::new(message)).unwrap_or_default();
    json_response(status, payload)
}
