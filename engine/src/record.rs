//! Record types for storing data.

use crate::RecordId;
use serde::{Deserialize, Serialize};

/// Untyped record fields, for stores that do not know their entity shape.
pub type JsonFields = serde_json::Map<String, serde_json::Value>;

/// A data record in a collection.
///
/// The `id` is owned by the store: it is assigned on creation and never
/// changes. Everything else lives in `fields` and is serialized alongside
/// the id, with field names kept exactly as `T` spells them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record<T> {
    /// Store-assigned identifier
    pub id: RecordId,
    /// Entity-specific payload, opaque to the store
    #[serde(flatten)]
    pub fields: T,
}

impl<T> Record<T> {
    /// Create a record with an explicit id.
    pub fn new(id: RecordId, fields: T) -> Self {
        Self { id, fields }
    }

    /// Replace the payload, keeping the id.
    pub fn with_fields<U>(self, fields: U) -> Record<U> {
        Record {
            id: self.id,
            fields,
        }
    }
}

/// Drop any caller-supplied `id` key from untyped fields.
///
/// The id is always the store's to assign, and leaving the key in would
/// serialize a second `id` next to the real one.
pub fn strip_id(mut fields: JsonFields) -> JsonFields {
    fields.remove("id");
    fields
}
