//! Route handlers.
//!
//! Each handler performs exactly one [`SharedStore`] operation. Write
//! handlers decode the raw body bytes themselves so that clients which omit
//! `Content-Type: application/json` are still accepted.

use std::num::IntErrorKind;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use objectd_core::{Record, SharedStore};

use crate::error::ApiError;

pub const HOME_PAGE: &str = "Welcome to the HomePage!";
pub const REMOVED_MESSAGE: &str = "Removed";

type ApiResult = Result<Response, ApiError>;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse an `{id}` path segment. Numbers out of range clamp to
/// `i64::MAX`/`i64::MIN`; anything else that is not an integer is id 0.
pub fn parse_id(raw: &str) -> i64 {
    match raw.parse::<i64>() {
        Ok(id) => id,
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => 0,
        },
    }
}

fn decode(body: &Bytes) -> Result<Record, ApiError> {
    Record::from_json_slice(body).map_err(ApiError::MalformedBody)
}

fn json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> ApiResult {
    let body = serde_json::to_vec(value).map_err(ApiError::Encoding)?;
    Ok((
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Served for every verb on `/`.
pub async fn home() -> &'static str {
    tracing::info!("homepage hit");
    HOME_PAGE
}

pub async fn list_records(State(store): State<SharedStore>) -> ApiResult {
    let records = store.list().await;
    json(StatusCode::OK, &records)
}

pub async fn get_record(State(store): State<SharedStore>, Path(raw_id): Path<String>) -> ApiResult {
    let id = parse_id(&raw_id);
    let record = store.get_by_id(id).await.ok_or(ApiError::NotFound(id))?;
    json(StatusCode::OK, &record)
}

pub async fn create_record(State(store): State<SharedStore>, body: Bytes) -> ApiResult {
    let record = decode(&body)?;
    store.insert(record.clone()).await;
    tracing::debug!(id = record.id, "record created");
    json(StatusCode::CREATED, &record)
}

pub async fn replace_record(
    State(store): State<SharedStore>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> ApiResult {
    let id = parse_id(&raw_id);
    let record = decode(&body)?;
    let stored = store
        .replace_by_id(id, record)
        .await
        .ok_or(ApiError::NotFound(id))?;
    tracing::debug!(id, "record replaced");
    json(StatusCode::OK, &stored)
}

pub async fn merge_record(
    State(store): State<SharedStore>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> ApiResult {
    let id = parse_id(&raw_id);
    let patch = decode(&body)?;
    let merged = store
        .merge_by_id(id, patch)
        .await
        .ok_or(ApiError::NotFound(id))?;
    tracing::debug!(id, "record merged");
    json(StatusCode::OK, &merged)
}

pub async fn delete_record(
    State(store): State<SharedStore>,
    Path(raw_id): Path<String>,
) -> ApiResult {
    let id = parse_id(&raw_id);
    store.delete_by_id(id).await.ok_or(ApiError::NotFound(id))?;
    tracing::debug!(id, "record removed");
    json(StatusCode::OK, REMOVED_MESSAGE)
}

/// Answer `301 Moved Permanently` pointing at the same path without its
/// trailing slash. The query string is kept.
pub async fn strip_trailing_slash(uri: Uri) -> Response {
    let path = uri.path().trim_end_matches('/');
    let target = match uri.query() {
        Some(q) => format!("{path}?{q}"),
        None => path.to_string(),
    };

    match HeaderValue::from_str(&target) {
        Ok(location) => (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}
