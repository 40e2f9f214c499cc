//! objectd-api — HTTP surface for the record store.
//!
//! | Path | Verb | Handler |
//! |------|------|---------|
//! | `/` | any | [`handlers::home`] |
//! | `/objects` | GET | [`handlers::list_records`] |
//! | `/object` | POST | [`handlers::create_record`] |
//! | `/object/{id}` | GET | [`handlers::get_record`] |
//! | `/object/{id}` | PUT | [`handlers::replace_record`] |
//! | `/object/{id}` | PATCH | [`handlers::merge_record`] |
//! | `/object/{id}` | DELETE | [`handlers::delete_record`] |
//!
//! The same paths with a trailing slash redirect to the canonical form.

pub mod error;
pub mod handlers;
pub mod middleware;

use axum::{
    routing::{any, get, post},
    Router,
};

use objectd_core::SharedStore;

pub use error::ApiError;

/// Build the application router over `store`.
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/", any(handlers::home))
        .route("/objects", get(handlers::list_records))
        .route("/object", post(handlers::create_record))
        .route(
            "/object/{id}",
            get(handlers::get_record)
                .put(handlers::replace_record)
                .patch(handlers::merge_record)
                .delete(handlers::delete_record),
        )
        .route("/objects/", any(handlers::strip_trailing_slash))
        .route("/object/", any(handlers::strip_trailing_slash))
        .route("/object/{id}/", any(handlers::strip_trailing_slash))
        .layer(axum::middleware::from_fn(middleware::log_request))
        .with_state(store)
}
