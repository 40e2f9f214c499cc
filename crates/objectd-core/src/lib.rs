//! objectd-core — record type, store, and configuration for objectd.
//!
//! The HTTP layer in `objectd-api` owns a [`SharedStore`] and translates each
//! request into one store operation:
//!
//! ```text
//! request ──► handler ──► SharedStore (RwLock) ──► RecordStore (Vec<Record>)
//! ```

pub mod config;
pub mod store;
pub mod types;

pub use store::{seed_records, RecordStore, SharedStore};
pub use types::Record;
