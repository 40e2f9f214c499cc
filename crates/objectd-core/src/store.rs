//! Store — the in-memory, insertion-ordered collection of [`Record`] values.
//!
//! [`RecordStore`] is a plain owned collection with synchronous operations.
//! [`SharedStore`] wraps it in a single lock so request handlers running on
//! different tasks can share it; every operation holds the lock for its whole
//! read-modify-write.
//!
//! All id-addressed operations scan from the front and act on the first
//! matching record only. Later records with the same id are never touched.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::types::Record;

/// Records present at startup unless seeding is disabled.
pub fn seed_records() -> Vec<Record> {
    vec![
        Record::new("alpha", 3343, "PTR452s"),
        Record::new("beta", 8374, "LSD532j"),
        Record::new("gamma", 1201, "WLD293i"),
    ]
}

// ---------------------------------------------------------------------------
// RecordStore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the three seed records.
    pub fn with_seed() -> Self {
        Self::from_records(seed_records())
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every record, in insertion order.
    pub fn list(&self) -> &[Record] {
        &self.records
    }

    pub fn get_by_id(&self, id: i64) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Append `record`. Duplicate ids are accepted.
    pub fn insert(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Overwrite the first record with `id`. Returns the stored record.
    pub fn replace_by_id(&mut self, id: i64, record: Record) -> Option<Record> {
        let slot = self.find_mut(id)?;
        *slot = record;
        Some(slot.clone())
    }

    /// Sparse-merge `patch` into the first record with `id`. Returns the
    /// merged record.
    pub fn merge_by_id(&mut self, id: i64, patch: Record) -> Option<Record> {
        let slot = self.find_mut(id)?;
        slot.merge(patch);
        Some(slot.clone())
    }

    /// Remove the first record with `id`, keeping the rest in order.
    pub fn delete_by_id(&mut self, id: i64) -> Option<Record> {
        let pos = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(pos))
    }

    fn find_mut(&mut self, id: i64) -> Option<&mut Record> {
        self.records.iter_mut().find(|r| r.id == id)
    }
}

// ---------------------------------------------------------------------------
// SharedStore
// ---------------------------------------------------------------------------

/// Cloneable handle to a [`RecordStore`] guarded by one `RwLock`.
///
/// Reads share the lock; mutations take it exclusively. The lock is never
/// held across an await point other than its own acquisition.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<RwLock<RecordStore>>,
}

impl SharedStore {
    pub fn new(store: RecordStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    pub async fn list(&self) -> Vec<Record> {
        self.inner.read().await.list().to_vec()
    }

    pub async fn get_by_id(&self, id: i64) -> Option<Record> {
        self.inner.read().await.get_by_id(id).cloned()
    }

    pub async fn insert(&self, record: Record) {
        self.inner.write().await.insert(record);
    }

    pub async fn replace_by_id(&self, id: i64, record: Record) -> Option<Record> {
        self.inner.write().await.replace_by_id(id, record)
    }

    pub async fn merge_by_id(&self, id: i64, patch: Record) -> Option<Record> {
        self.inner.write().await.merge_by_id(id, patch)
    }

    pub async fn delete_by_id(&self, id: i64) -> Option<Record> {
        self.inner.write().await.delete_by_id(id)
    }
}

impl From<RecordStore> for SharedStore {
    fn from(store: RecordStore) -> Self {
        Self::new(store)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
