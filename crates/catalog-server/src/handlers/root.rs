//! Liveness and fallback handlers

use crate::response::message_response;
use axum::{http::StatusCode, response::Response};

/// Answers any method with a fixed liveness message
pub async fn root() -> Response {
    message_response(StatusCode::OK, "server is up")
}

pub async fn not_found() -> Response {
    message_response(StatusCode::NOT_FOUND, "Not Found")
}
