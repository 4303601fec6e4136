//! Request errors and their HTTP mapping

use crate::config::StatusPolicy;
use crate::response::message_response;
use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Reasons a product request fails. `Display` is the message sent to the client.
#[derive(Error, Debug)]
pub enum ProductError {
    #[error("invalid http method")]
    MethodNotAllowed { allowed: Method },

    #[error("Required Product ID")]
    MissingId,

    #[error("Product Not Found")]
    NotFound,

    #[error("Error when parsing data")]
    InvalidProduct(#[source] serde_json::Error),

    #[error("Error when parsing products")]
    InvalidUpdate(#[source] serde_json::Error),

    #[error("Error While Parsing Data")]
    Encode(#[source] serde_json::Error),
}

impl StatusPolicy {
    pub fn status_for(self, err: &ProductError) -> StatusCode {
        match (self, err) {
            (_, ProductError::MethodNotAllowed { .. }) => StatusCode::METHOD_NOT_ALLOWED,
            (_, ProductError::Encode(_)) => StatusCode::INTERNAL_SERVER_ERROR,

            (StatusPolicy::Legacy, ProductError::MissingId) => StatusCode::METHOD_NOT_ALLOWED,
            (StatusPolicy::Legacy, ProductError::NotFound) => StatusCode::OK,
            (StatusPolicy::Legacy, ProductError::InvalidProduct(_))
            | (StatusPolicy::Legacy, ProductError::InvalidUpdate(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            (StatusPolicy::Corrected, ProductError::MissingId) => StatusCode::BAD_REQUEST,
            (StatusPolicy::Corrected, ProductError::NotFound) => StatusCode::NOT_FOUND,
            (StatusPolicy::Corrected, ProductError::InvalidProduct(_))
            | (StatusPolicy::Corrected, ProductError::InvalidUpdate(_)) => StatusCode::BAD_REQUEST,
        }
    }

    /// Turn a request failure into the response sent to the client
    pub fn reject(self, err: ProductError) -> ApiError {
        let status = self.status_for(&err);
        let allow = match (self, &err) {
            (StatusPolicy::Corrected, ProductError::MethodNotAllowed { allowed }) => {
                Some(allowed.clone())
            }
            _ => None,
        };
        ApiError {
            status,
            message: err.to_string(),
            allow,
        }
    }
}

/// Error response
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub allow: Option<Method>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = message_response(self.status, self.message);
        if let Some(allowed) = self.allow {
            if let Ok(value) = HeaderValue::from_str(allowed.as_str()) {
                response.headers_mut().insert(header::ALLOW, value);
            }
        }
        response
    }
}
