//! Product handlers
//!
//! Routes are registered for every method; each handler checks the method
//! itself so that the rejection carries a JSON body.

use crate::error::{ApiError, ProductError};
use crate::response::{json_response, message_response};
use crate::storage::ProductStore;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::{Method, StatusCode},
    response::Response,
};
use bytes::Bytes;
use catalog_types::Product;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Raw query pairs, in request order
pub type QueryPairs = Vec<(String, String)>;

fn require_method(method: &Method, allowed: Method) -> Result<(), ProductError> {
    if *method == allowed {
        Ok(())
    } else {
        debug!("Rejecting {} request, expected {}", method, allowed);
        Err(ProductError::MethodNotAllowed { allowed })
    }
}

/// First `id` in the query string. An empty value still counts as present.
fn require_id(query: &QueryPairs) -> Result<&str, ProductError> {
    query
        .iter()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.as_str())
        .ok_or(ProductError::MissingId)
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Response, ProductError> {
    let payload = serde_json::to_vec(value).map_err(ProductError::Encode)?;
    Ok(json_response(StatusCode::OK, payload))
}

pub async fn list(State(state): State<AppState>, method: Method) -> Result<Response, ApiError> {
    list_products(&state.store, &method).map_err(|e| state.policy.reject(e))
}

pub async fn get(
    State(state): State<AppState>,
    method: Method,
    Query(query): Query<QueryPairs>,
) -> Result<Response, ApiError> {
    get_product(&state.store, &method, &query).map_err(|e| state.policy.reject(e))
}

pub async fn delete(
    State(state): State<AppState>,
    method: Method,
    Query(query): Query<QueryPairs>,
) -> Result<Response, ApiError> {
    delete_product(&state.store, &method, &query).map_err(|e| state.policy.reject(e))
}

pub async fn add(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Result<Response, ApiError> {
    add_product(&state.store, &method, &body).map_err(|e| state.policy.reject(e))
}

pub async fn update(
    State(state): State<AppState>,
    method: Method,
    Query(query): Query<QueryPairs>,
    body: Bytes,
) -> Result<Response, ApiError> {
    update_product(&state.store, &method, &query, &body).map_err(|e| state.policy.reject(e))
}

fn list_products(store: &ProductStore, method: &Method) -> Result<Response, ProductError> {
    require_method(method, Method::GET)?;
    encode(&store.list())
}

fn get_product(
    store: &ProductStore,
    method: &Method,
    query: &QueryPairs,
) -> Result<Response, ProductError> {
    require_method(method, Method::GET)?;
    let id = require_id(query)?;
    let product = store.get(id).ok_or(ProductError::NotFound)?;
    encode(&product)
}

fn delete_product(
    store: &ProductStore,
    method: &Method,
    query: &QueryPairs,
) -> Result<Response, ProductError> {
    require_method(method, Method::DELETE)?;
    let id = require_id(query)?;
    let product = store.remove(id).ok_or(ProductError::NotFound)?;
    info!("Deleted product {}", id);
    encode(&product)
}

fn add_product(store: &ProductStore, method: &Method, body: &[u8]) -> Result<Response, ProductError> {
    require_method(method, Method::POST)?;
    let product = Product::from_json_prefix(body).map_err(|e| {
        warn!("Failed to decode product: {}", e);
        ProductError::InvalidProduct(e)
    })?;

    let id = product.id.clone();
    if store.upsert(product).is_some() {
        info!("Replaced product {}", id);
    } else {
        info!("Created product {}", id);
    }

    Ok(message_response(StatusCode::CREATED, "Success Create Product"))
}

fn update_product(
    store: &ProductStore,
    method: &Method,
    query: &QueryPairs,
    body: &[u8],
) -> Result<Response, ProductError> {
    require_method(method, Method::PUT)?;
    let id = require_id(query)?;
    if store.get(id).is_none() {
        return Err(ProductError::NotFound);
    }

    let patch = Product::from_json_prefix(body).map_err(|e| {
        warn!("Failed to decode update for product {}: {}", id, e);
        ProductError::InvalidUpdate(e)
    })?;

    // Deleted between the lookup and here
    let product = store.update(id, &patch).ok_or(ProductError::NotFound)?;
    info!("Updated product {}", id);
    encode(&product)
}
