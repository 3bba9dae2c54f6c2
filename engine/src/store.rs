//! Store - CRUD over one persisted collection.
//!
//! A [`LocalStore`] owns its storage port and a single key. Every operation
//! reads the whole collection, works on it in memory and, if anything
//! changed, writes the whole collection back. There is no locking: two
//! processes sharing a key will lose each other's updates.

use crate::{
    entity::Entity,
    error::{Error, Result},
    storage::Storage,
    record::strip_id,
    Collection, IdArg, Record,
};
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;

/// Entity name used in messages when none is configured.
pub const DEFAULT_ENTITY: &str = "record";

/// A persistent collection of `T` records stored under one key.
#[derive(Debug)]
pub struct LocalStore<T, S> {
    storage: S,
    key: String,
    entity: String,
    _fields: PhantomData<fn() -> T>,
}

impl<T: Entity, S: Storage> LocalStore<T, S> {
    /// Open the store for a typed entity under its own key.
    pub fn for_entity(storage: S) -> Self {
        Self::new(storage, T::KEY).with_entity(T::NAME)
    }
}

impl<T, S> LocalStore<T, S>
where
    T: Serialize + DeserializeOwned,
    S: Storage,
{
    /// Create a store over `storage` using `key` as its slot.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            entity: DEFAULT_ENTITY.to_string(),
            _fields: PhantomData,
        }
    }

    /// Set the entity name used in not-found messages.
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = entity.into();
        self
    }

    /// The storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The entity name.
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Borrow the underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the underlying storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Load the whole collection.
    ///
    /// An absent or `null` slot is initialized to an empty collection and
    /// written back; otherwise nothing is written.
    pub fn load_all(&mut self) -> Result<Collection<T>> {
        let persisted = match self.storage.read(&self.key)? {
            Some(text) => serde_json::from_str::<Option<Collection<T>>>(&text).map_err(|e| {
                tracing::warn!(key = %self.key, error = %e, "persisted collection is corrupt");
                Error::Corrupt(e.to_string())
            })?,
            None => None,
        };

        match persisted {
            Some(collection) => Ok(collection),
            None => {
                let collection = Collection::new();
                self.persist(&collection)?;
                tracing::debug!(key = %self.key, "initialized empty collection");
                Ok(collection)
            }
        }
    }

    /// Get the record whose id loosely matches `id`.
    pub fn get_by_id(&mut self, id: impl Into<IdArg>) -> Result<Record<T>> {
        let id = id.into();
        if id.is_missing() {
            return Err(Error::MissingParameter);
        }

        let collection = self.load_all()?;
        tracing::trace!(key = %self.key, %id, "lookup");
        match collection.position(&id) {
            Some(index) => Ok(collection.into_items().swap_remove(index)),
            None => Err(self.not_found(&id)),
        }
    }

    /// Append a new record, assigning it the next id.
    ///
    /// An `id` carried inside `fields` is discarded. Fails without writing
    /// once the id counter is exhausted.
    pub fn add(&mut self, fields: T) -> Result<Record<T>>
    where
        T: Clone,
    {
        let fields = self.without_id(fields)?;
        let mut collection = self.load_all()?;
        let record = collection.push(fields)?.clone();
        self.persist(&collection)?;
        tracing::debug!(key = %self.key, id = record.id, "added record");
        Ok(record)
    }

    /// Replace an existing record wholesale, keeping its position.
    pub fn update(&mut self, record: Record<T>) -> Result<Collection<T>> {
        self.update_by(record.id, record.fields)
    }

    /// Replace the payload of the record matching `id`.
    ///
    /// Same as [`update`](Self::update) for callers holding a loose id, such
    /// as one parsed from JSON. A missing id matches nothing.
    pub fn update_by(&mut self, id: impl Into<IdArg>, fields: T) -> Result<Collection<T>> {
        let id = id.into();
        let fields = self.without_id(fields)?;
        let mut collection = self.load_all()?;
        if collection.replace(&id, fields).is_none() {
            return Err(self.not_found(&id));
        }
        self.persist(&collection)?;
        tracing::debug!(key = %self.key, %id, "updated record");
        Ok(collection)
    }

    /// Remove the record whose id loosely matches `id`.
    pub fn delete(&mut self, id: impl Into<IdArg>) -> Result<Collection<T>> {
        let id = id.into();
        if id.is_missing() {
            return Err(Error::MissingParameter);
        }

        let mut collection = self.load_all()?;
        if collection.remove(&id).is_none() {
            return Err(self.not_found(&id));
        }
        self.persist(&collection)?;
        tracing::debug!(key = %self.key, %id, "deleted record");
        Ok(collection)
    }

    fn persist(&mut self, collection: &Collection<T>) -> Result<()> {
        let text =
            serde_json::to_string(collection).map_err(|e| Error::Serialize(e.to_string()))?;
        self.storage.write(&self.key, &text)
    }

    /// Drop an `id` key the payload serializes itself; ids belong to the store.
    fn without_id(&self, fields: T) -> Result<T> {
        let value = serde_json::to_value(&fields).map_err(|e| Error::Serialize(e.to_string()))?;
        match value {
            serde_json::Value::Object(map) if map.contains_key("id") => {
                tracing::debug!(key = %self.key, "discarded caller-supplied id");
                serde_json::from_value(serde_json::Value::Object(strip_id(map)))
                    .map_err(|e| Error::Serialize(e.to_string()))
            }
            _ => Ok(fields),
        }
    }

    fn not_found(&self, id: &IdArg) -> Error {
        Error::not_found(&self.entity, id)
    }
}
