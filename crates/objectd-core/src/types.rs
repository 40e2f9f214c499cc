//! Core types for objectd-core.
//!
//! This module defines [`Record`], the single entity held by the store, and
//! the sparse-merge rule used by partial updates.

use std::fmt;

use serde::de::{Deserialize, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Serialize;

/// A single record in the collection.
///
/// Decoding is lenient in the same ways as a plain JSON object decoder:
/// - every field has a zero default, so a body may omit any of them;
/// - keys match field names ignoring ASCII case (`"ID"` sets `id`);
/// - a `null` value leaves the field as it was;
/// - when a field appears more than once, the last occurrence wins;
/// - unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Record {
    pub name: String,
    /// Lookup key. Not unique: the store allows duplicates and zero.
    pub id: i64,
    pub value: String,
}

impl Record {
    pub fn new(name: impl Into<String>, id: i64, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id,
            value: value.into(),
        }
    }

    /// Overlay the non-zero fields of `patch` onto `self`.
    ///
    /// A zero `id` or an empty `name`/`value` in the patch means "leave as
    /// is". There is no way to clear a field through a merge.
    pub fn merge(&mut self, patch: Record) {
        if patch.id != 0 {
            self.id = patch.id;
        }
        if !patch.name.is_empty() {
            self.name = patch.name;
        }
        if !patch.value.is_empty() {
            self.value = patch.value;
        }
    }

    /// Decode a request body. `null` decodes to the all-default record.
    pub fn from_json_slice(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice::<Option<Record>>(body).map(Option::unwrap_or_default)
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

enum Field {
    Name,
    Id,
    Value,
}

impl Field {
    fn from_key(key: &str) -> Option<Self> {
        if key.eq_ignore_ascii_case("name") {
            Some(Field::Name)
        } else if key.eq_ignore_ascii_case("id") {
            Some(Field::Id)
        } else if key.eq_ignore_ascii_case("value") {
            Some(Field::Value)
        } else {
            None
        }
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object with name, id and value fields")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Record, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut record = Record::default();

        // Keys are applied in document order, so a repeated field keeps its
        // last non-null value.
        while let Some(key) = map.next_key::<String>()? {
            match Field::from_key(&key) {
                Some(Field::Name) => {
                    if let Some(name) = map.next_value::<Option<String>>()? {
                        record.name = name;
                    }
                }
                Some(Field::Id) => {
                    if let Some(id) = map.next_value::<Option<i64>>()? {
                        record.id = id;
                    }
                }
                Some(Field::Value) => {
                    if let Some(value) = map.next_value::<Option<String>>()? {
                        record.value = value;
                    }
                }
                None => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(record)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
