//! Tagged result shapes for callers that speak JSON.
//!
//! Every store operation maps onto one of three objects:
//! - `{"record": <record>}` for a single record
//! - `{"collection": {"nextId": .., "items": [..]}}` after a mutation
//! - `{"error": "<message>"}` when the operation was refused

use crate::{error::Result, Collection, Record};
use serde::Serialize;

/// A store outcome ready to be serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response<T: Serialize> {
    Record { record: Record<T> },
    Collection { collection: Collection<T> },
    Error { error: String },
}

impl<T: Serialize> Response<T> {
    /// Build an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Response::Error {
            error: message.into(),
        }
    }

    /// Whether this response carries an error.
    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error { .. })
    }

    /// Serialize to a JSON string.
    ///
    /// Falls back to an error object if the payload cannot be encoded.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            serde_json::json!({ "error": format!("serialization failed: {e}") }).to_string()
        })
    }
}

impl<T: Serialize> From<Result<Record<T>>> for Response<T> {
    fn from(result: Result<Record<T>>) -> Self {
        match result {
            Ok(record) => Response::Record { record },
            Err(e) => Response::error(e.to_string()),
        }
    }
}

impl<T: Serialize> From<Result<Collection<T>>> for Response<T> {
    fn from(result: Result<Collection<T>>) -> Self {
        match result {
            Ok(collection) => Response::Collection { collection },
            Err(e) => Response::error(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, JsonFields};
    use serde_json::json;

    #[test]
    fn record_shape() {
        let fields = json!({"name": "Rex"}).as_object().cloned().unwrap();
        let result: Result<Record<JsonFields>> = Ok(Record::new(1, fields));
        let response = Response::from(result);

        assert_eq!(response.to_json(), r#"{"record":{"id":1,"name":"Rex"}}"#);
        assert!(!response.is_error());
    }

    #[test]
    fn collection_shape() {
        let result: Result<Collection<JsonFields>> = Ok(Collection::new());
        let response = Response::from(result);
        assert_eq!(
            response.to_json(),
            r#"{"collection":{"nextId":1,"items":[]}}"#
        );
    }

    #[test]
    fn error_shape() {
        let result: Result<Record<JsonFields>> = Err(Error::not_found("record", 1));
        let response: Response<JsonFields> = result.into();

        assert!(response.is_error());
        assert_eq!(response.to_json(), r#"{"error":"record with id 1 not found"}"#);
    }
}
