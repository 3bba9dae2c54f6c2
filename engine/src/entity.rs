//! Typed entity field sets.
//!
//! An [`Entity`] ties a field struct to the storage key its collection lives
//! under and the singular name used in error messages.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A record payload with a fixed storage slot.
pub trait Entity: Serialize + DeserializeOwned {
    /// Storage key holding the collection, e.g. `"dogs"`.
    const KEY: &'static str;
    /// Singular name used in messages, e.g. `"dog"`.
    const NAME: &'static str;
}

/// A dog, stored under `"dogs"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    pub name: String,
    pub breed: String,
}

impl Entity for Dog {
    const KEY: &'static str = "dogs";
    const NAME: &'static str = "dog";
}

/// A book, stored under `"books"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    /// Publication year, kept as text the way the forms collect it.
    pub year: String,
}

impl Entity for Book {
    const KEY: &'static str = "books";
    const NAME: &'static str = "book";
}

/// A restaurant, stored under `"restaurants"`. The address may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub address: String,
}

impl Entity for Restaurant {
    const KEY: &'static str = "restaurants";
    const NAME: &'static str = "restaurant";
}

/// Singular entity name for a known storage key.
///
/// Unknown keys fall back to `"record"`.
pub fn name_for_key(key: &str) -> &'static str {
    [
        (Dog::KEY, Dog::NAME),
        (Book::KEY, Book::NAME),
        (Restaurant::KEY, Restaurant::NAME),
    ]
    .into_iter()
    .find_map(|(k, name)| (k == key).then_some(name))
    .unwrap_or(crate::store::DEFAULT_ENTITY)
}
