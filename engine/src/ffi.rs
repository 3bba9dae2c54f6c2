//! FFI layer for embedding the store in non-Rust UI hosts.
//!
//! This module provides C-compatible functions over a file-backed store of
//! untyped records. All data crosses the boundary as JSON strings.
//!
//! # Memory Management
//!
//! - Strings returned by `shelf_*` functions are allocated by Rust
//! - Caller must free them with `shelf_string_free`
//! - Store pointers must be freed with `shelf_store_free`
//!
//! # Results
//!
//! Functions return JSON in one of the [`Response`] shapes:
//! - `{"record": <record>}`
//! - `{"collection": {"nextId": <n>, "items": [...]}}`
//! - `{"error": "<message>"}`
//!
//! Id arguments are JSON too: `3`, `"3"`, or `null` (or a null pointer)
//! for a missing id.

use crate::{
    entity::name_for_key, storage::is_valid_key, FileStorage, IdArg, JsonFields, LocalStore,
    Response,
};
use serde_json::Value;
use std::ffi::{c_char, CStr, CString};
use std::ptr;

/// Store type handed across the boundary.
pub type JsonStore = LocalStore<JsonFields, FileStorage>;

fn error_json(message: impl Into<String>) -> String {
    Response::<JsonFields>::error(message).to_json()
}

/// Convert a Rust string to a C string pointer.
/// Caller must free with `shelf_string_free`.
fn to_c_string(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(cs) => cs.into_raw(),
        Err(_) => {
            let error = CString::new(r#"{"error":"string contained null bytes"}"#)
                .unwrap_or_default();
            error.into_raw()
        }
    }
}

/// Convert a C string pointer to a Rust string.
/// Returns None if pointer is null or invalid UTF-8.
unsafe fn from_c_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Read an id argument. A null pointer is a missing id.
unsafe fn id_arg(id_json: *const c_char) -> Result<IdArg, String> {
    if id_json.is_null() {
        return Ok(IdArg::Missing);
    }
    let text = from_c_string(id_json).ok_or("invalid id string")?;
    let value: Value = serde_json::from_str(&text).map_err(|e| format!("parse error: {e}"))?;
    Ok(IdArg::from_json(&value))
}

/// Read a JSON object of record fields.
unsafe fn record_fields(record_json: *const c_char) -> Result<JsonFields, String> {
    let text = from_c_string(record_json).ok_or("invalid record JSON")?;
    match serde_json::from_str::<Value>(&text).map_err(|e| format!("parse error: {e}"))? {
        Value::Object(fields) => Ok(fields),
        _ => Err("record must be a JSON object".to_string()),
    }
}

// ============================================================================
// Store Lifecycle
// ============================================================================

/// Open a store over a data directory.
///
/// # Arguments
/// - `data_dir`: Directory holding one file per key
/// - `key`: Storage key, e.g. `"dogs"`
/// - `entity`: Singular name for messages, or null to derive it from `key`
///
/// # Returns
/// Pointer to the store, or null on failure (including a `key` outside
/// ASCII letters, digits, `_` and `-`).
///
/// # Safety
/// - `data_dir`, `key` and `entity` must be valid null-terminated C strings or null
/// - Caller must free the returned pointer with `shelf_store_free`
#[no_mangle]
pub unsafe extern "C" fn shelf_store_open(
    data_dir: *const c_char,
    key: *const c_char,
    entity: *const c_char,
) -> *mut JsonStore {
    let Some(dir) = from_c_string(data_dir) else {
        return ptr::null_mut();
    };
    let Some(key) = from_c_string(key) else {
        return ptr::null_mut();
    };
    if !is_valid_key(&key) {
        tracing::error!(%key, "invalid storage key");
        return ptr::null_mut();
    }
    let entity = from_c_string(entity).unwrap_or_else(|| name_for_key(&key).to_string());

    let storage = match FileStorage::open(dir) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "failed to open storage");
            return ptr::null_mut();
        }
    };

    let store = LocalStore::new(storage, key).with_entity(entity);
    Box::into_raw(Box::new(store))
}

/// Free a store.
///
/// # Safety
/// - `store` must be a valid pointer from `shelf_store_open`
/// - Must not be called twice on the same pointer
#[no_mangle]
pub unsafe extern "C" fn shelf_store_free(store: *mut JsonStore) {
    if !store.is_null() {
        drop(Box::from_raw(store));
    }
}

/// Free a string allocated by the engine.
///
/// # Safety
/// - `s` must be a valid pointer from a `shelf_*` function
/// - Must not be called twice on the same pointer
#[no_mangle]
pub unsafe extern "C" fn shelf_string_free(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

// ============================================================================
// Store Operations
// ============================================================================

/// Load the whole collection.
///
/// # Returns
/// JSON string: `{"collection": ...}` or `{"error": "message"}`
///
/// # Safety
/// - `store` must be a valid pointer from `shelf_store_open` or null
/// - Caller must free the returned string with `shelf_string_free`
#[no_mangle]
pub unsafe extern "C" fn shelf_store_load_all(store: *mut JsonStore) -> *mut c_char {
    let Some(store) = store.as_mut() else {
        return to_c_string(error_json("null store pointer"));
    };

    to_c_string(Response::from(store.load_all()).to_json())
}

/// Get a record by id.
///
/// # Returns
/// JSON string: `{"record": ...}` or `{"error": "message"}`
///
/// # Safety
/// - `store` must be a valid pointer from `shelf_store_open` or null
/// - `id_json` must be a valid null-terminated C string or null
/// - Caller must free the returned string with `shelf_string_free`
#[no_mangle]
pub unsafe extern "C" fn shelf_store_get(
    store: *mut JsonStore,
    id_json: *const c_char,
) -> *mut c_char {
    let Some(store) = store.as_mut() else {
        return to_c_string(error_json("null store pointer"));
    };

    match id_arg(id_json) {
        Ok(id) => to_c_string(Response::from(store.get_by_id(id)).to_json()),
        Err(e) => to_c_string(error_json(e)),
    }
}

/// Add a record. Any `id` in the input is ignored.
///
/// # Returns
/// JSON string: `{"record": ...}` or `{"error": "message"}`
///
/// # Safety
/// - `store` must be a valid pointer from `shelf_store_open` or null
/// - `record_json` must be a valid null-terminated C string or null
/// - Caller must free the returned string with `shelf_string_free`
#[no_mangle]
pub unsafe extern "C" fn shelf_store_add(
    store: *mut JsonStore,
    record_json: *const c_char,
) -> *mut c_char {
    let Some(store) = store.as_mut() else {
        return to_c_string(error_json("null store pointer"));
    };

    match record_fields(record_json) {
        Ok(fields) => to_c_string(Response::from(store.add(fields)).to_json()),
        Err(e) => to_c_string(error_json(e)),
    }
}

/// Replace the record named by the input's `id`.
///
/// # Returns
/// JSON string: `{"collection": ...}` or `{"error": "message"}`
///
/// # Safety
/// - `store` must be a valid pointer from `shelf_store_open` or null
/// - `record_json` must be a valid null-terminated C string or null
/// - Caller must free the returned string with `shelf_string_free`
#[no_mangle]
pub unsafe extern "C" fn shelf_store_update(
    store: *mut JsonStore,
    record_json: *const c_char,
) -> *mut c_char {
    let Some(store) = store.as_mut() else {
        return to_c_string(error_json("null store pointer"));
    };

    match record_fields(record_json) {
        Ok(fields) => {
            let id = IdArg::from_json(fields.get("id").unwrap_or(&Value::Null));
            to_c_string(Response::from(store.update_by(id, fields)).to_json())
        }
        Err(e) => to_c_string(error_json(e)),
    }
}

/// Delete a record by id.
///
/// # Returns
/// JSON string: `{"collection": ...}` or `{"error": "message"}`
///
/// # Safety
/// - `store` must be a valid pointer from `shelf_store_open` or null
/// - `id_json` must be a valid null-terminated C string or null
/// - Caller must free the returned string with `shelf_string_free`
#[no_mangle]
pub unsafe extern "C" fn shelf_store_delete(
    store: *mut JsonStore,
    id_json: *const c_char,
) -> *mut c_char {
    let Some(store) = store.as_mut() else {
        return to_c_string(error_json("null store pointer"));
    };

    match id_arg(id_json) {
        Ok(id) => to_c_string(Response::from(store.delete(id)).to_json()),
        Err(e) => to_c_string(error_json(e)),
    }
}

// ============================================================================
// Utility
// ============================================================================

/// Get the engine version.
///
/// # Returns
/// Static string pointer (do not free)
#[no_mangle]
pub extern "C" fn shelf_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
