//! The persisted aggregate: records plus the id counter.

use crate::{
    error::{Error, Result},
    IdArg, Record, RecordId,
};
use serde::{Deserialize, Serialize};

/// The first id handed out by an empty collection.
pub const FIRST_ID: RecordId = 1;

/// An ordered collection of records of one entity type.
///
/// Serialized as exactly `{"nextId": <n>, "items": [...]}`. Item order is
/// insertion order, and `next_id` only ever grows so deleted ids are never
/// issued again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection<T> {
    next_id: RecordId,
    items: Vec<Record<T>>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Collection<T> {
    /// Create an empty collection starting at [`FIRST_ID`].
    pub fn new() -> Self {
        Self {
            next_id: FIRST_ID,
            items: Vec::new(),
        }
    }

    /// Rebuild a collection from persisted parts.
    pub fn from_parts(next_id: RecordId, items: Vec<Record<T>>) -> Self {
        Self { next_id, items }
    }

    /// The id the next added record will receive.
    pub fn next_id(&self) -> RecordId {
        self.next_id
    }

    /// Records in insertion order.
    pub fn items(&self) -> &[Record<T>] {
        &self.items
    }

    /// Consume the collection, keeping its records.
    pub fn into_items(self) -> Vec<Record<T>> {
        self.items
    }

    /// Index of the first record whose id loosely matches `id`.
    pub fn position(&self, id: &IdArg) -> Option<usize> {
        self.items.iter().position(|r| id.matches(r.id))
    }

    /// Get a record by loosely matched id.
    pub fn get(&self, id: &IdArg) -> Option<&Record<T>> {
        self.position(id).map(|index| &self.items[index])
    }

    /// Assign the next id to `fields`, append the record and return it.
    ///
    /// Fails with [`Error::IdsExhausted`], leaving the collection untouched,
    /// when the counter cannot advance.
    pub fn push(&mut self, fields: T) -> Result<&Record<T>> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(Error::IdsExhausted)?;
        self.items.push(Record::new(id, fields));
        Ok(&self.items[self.items.len() - 1])
    }

    /// Replace the payload of the first record matching `id`, in place.
    ///
    /// The stored record keeps its own id and position; the whole payload is
    /// swapped, nothing is merged. Returns the previous record, or `None`
    /// when nothing matches.
    pub fn replace(&mut self, id: &IdArg, fields: T) -> Option<Record<T>> {
        let index = self.position(id)?;
        let current = self.items[index].id;
        Some(std::mem::replace(
            &mut self.items[index],
            Record::new(current, fields),
        ))
    }

    /// Remove the first record with a matching id.
    pub fn remove(&mut self, id: &IdArg) -> Option<Record<T>> {
        self.position(id).map(|index| self.items.remove(index))
    }

    /// Count of records.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record<T>> {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a Record<T>;
    type IntoIter = std::slice::Iter<'a, Record<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
