//! Test builders — ergonomic constructors for `Record` and request bodies.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use fake::faker::lorem::en::Word;
use fake::Fake;
use objectd_core::{Record, RecordStore};

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Record`] fixtures.
///
/// # Example
///
/// ```rust
/// let rec = RecordBuilder::new(4000).name("delta").value("X").build();
/// let body = RecordBuilder::new(0).value("UPDATED").json();
/// ```
pub struct RecordBuilder {
    name: String,
    id: i64,
    value: String,
}

impl RecordBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            name: String::new(),
            id,
            value: String::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn build(self) -> Record {
        Record::new(self.name, self.id, self.value)
    }

    /// The record as a JSON request body.
    pub fn json(self) -> String {
        serde_json::to_string(&self.build()).unwrap()
    }
}

// ---------------------------------------------------------------------------
// Random records
// ---------------------------------------------------------------------------

/// A record with random words for `name` and `value` and the given id.
pub fn random_record(id: i64) -> Record {
    Record::new(Word().fake::<String>(), id, Word().fake::<String>())
}

/// `n` random records with ids `base..base + n`.
pub fn random_records(base: i64, n: usize) -> Vec<Record> {
    (0..n as i64).map(|i| random_record(base + i)).collect()
}

/// A store holding `n` random records with ids `0..n`.
pub fn store_of(n: usize) -> RecordStore {
    RecordStore::from_records(random_records(0, n))
}
