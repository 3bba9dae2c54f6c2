//! # Shelf Engine
//!
//! A local collection store for client-side applications.
//!
//! Each entity type lives in one persisted collection under a single storage
//! key. The store offers get-all, get-by-id, add, update and delete, hands
//! out auto-incrementing integer ids that are never reused, and rewrites the
//! whole collection on every change.
//!
//! ## Design Principles
//!
//! - **Injected storage**: the store owns a [`Storage`] port; nothing global
//! - **Synchronous**: every operation completes before returning
//! - **All-or-nothing**: a refused operation performs no write
//! - **Loose ids**: `3` and `"3"` name the same record, by explicit rule
//!
//! ## Core Concepts
//!
//! ### Records
//!
//! A [`Record<T>`] is a store-assigned `id` plus caller fields `T`, which
//! may be a typed [`Entity`] such as [`Dog`] or untyped [`JsonFields`].
//!
//! ### Collections
//!
//! A [`Collection<T>`] is the persisted aggregate, serialized as
//! `{"nextId": <n>, "items": [...]}`.
//!
//! ### Errors
//!
//! Missing ids and unknown ids come back as [`Error::MissingParameter`] and
//! [`Error::NotFound`]. Corrupt data and storage failures are fatal and
//! propagate unchanged. [`Response`] renders any outcome as
//! `{"record": ..}`, `{"collection": ..}` or `{"error": ".."}`.
//!
//! ## Quick Start
//!
//! ```rust
//! use shelf_engine::{Dog, LocalStore, MemoryStorage};
//!
//! let mut store: LocalStore<Dog, _> = LocalStore::for_entity(MemoryStorage::new());
//!
//! let rex = store
//!     .add(Dog { name: "Rex".into(), breed: "Beagle".into() })
//!     .unwrap();
//! assert_eq!(rex.id, 1);
//!
//! // Ids may be given as numbers or numeric strings.
//! let found = store.get_by_id("1").unwrap();
//! assert_eq!(found.fields.name, "Rex");
//!
//! let collection = store.delete(1).unwrap();
//! assert!(collection.is_empty());
//! assert_eq!(collection.next_id(), 2);
//!
//! let err = store.get_by_id(1).unwrap_err();
//! assert_eq!(err.to_string(), "dog with id 1 not found");
//! ```
//!
//! ## FFI
//!
//! The [`ffi`] module exposes a file-backed store of untyped records through
//! C-compatible functions. All data is exchanged as JSON strings.

pub mod collection;
pub mod entity;
pub mod error;
pub mod ffi;
pub mod id;
pub mod record;
pub mod response;
pub mod storage;
pub mod store;

// Re-export main types at crate root
pub use collection::{Collection, FIRST_ID};
pub use entity::{Book, Dog, Entity, Restaurant};
pub use error::Error;
pub use id::{loose_eq, IdArg};
pub use record::{JsonFields, Record};
pub use response::Response;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{LocalStore, DEFAULT_ENTITY};

/// Identifier assigned to records by the store.
pub type RecordId = u64;
