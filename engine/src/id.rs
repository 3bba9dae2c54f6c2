//! Identifier arguments and loose id comparison.
//!
//! Callers may name a record by number (`3`) or by numeric string (`"3"`),
//! and both must find the same record. Rather than relying on implicit
//! coercion, both sides are reduced to a canonical integer before comparing.

use crate::RecordId;
use serde_json::Value;
use std::fmt;

/// An id as supplied by a caller of the store.
#[derive(Debug, Clone, PartialEq)]
pub enum IdArg {
    /// No id was supplied.
    Missing,
    /// A numeric id.
    Int(i64),
    /// A textual id, compared by its numeric value.
    Text(String),
}

impl IdArg {
    /// Interpret a JSON value as an id argument. `null` means missing.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => IdArg::Missing,
            Value::String(s) => IdArg::Text(s.clone()),
            Value::Number(n) => match n.as_i64() {
                Some(i) => IdArg::Int(i),
                None => IdArg::Text(n.to_string()),
            },
            other => IdArg::Text(other.to_string()),
        }
    }

    /// Whether an id was supplied at all.
    pub fn is_missing(&self) -> bool {
        matches!(self, IdArg::Missing)
    }

    /// Reduce the argument to the record id it names, if any.
    ///
    /// Strings are trimmed and read as an integer, or as a float with no
    /// fractional part. Anything else names no record.
    pub fn canonical(&self) -> Option<RecordId> {
        match self {
            IdArg::Missing => None,
            IdArg::Int(i) => RecordId::try_from(*i).ok(),
            IdArg::Text(s) => canonical_text(s),
        }
    }

    /// Loose equality against a stored record id.
    pub fn matches(&self, id: RecordId) -> bool {
        self.canonical() == Some(id)
    }
}

fn canonical_text(s: &str) -> Option<RecordId> {
    let s = s.trim();
    if let Ok(id) = s.parse::<RecordId>() {
        return Some(id);
    }
    let f: f64 = s.parse().ok()?;
    // Beyond 2^53 a float no longer names a single integer.
    if f.is_finite() && f.fract() == 0.0 && (0.0..=9_007_199_254_740_992.0).contains(&f) {
        Some(f as RecordId)
    } else {
        None
    }
}

/// Loose id equality: `loose_eq(&"3".into(), 3)` holds.
pub fn loose_eq(arg: &IdArg, id: RecordId) -> bool {
    arg.matches(id)
}

impl fmt::Display for IdArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdArg::Missing => f.write_str("undefined"),
            IdArg::Int(i) => write!(f, "{i}"),
            IdArg::Text(s) => f.write_str(s),
        }
    }
}

impl From<RecordId> for IdArg {
    fn from(id: RecordId) -> Self {
        match i64::try_from(id) {
            Ok(i) => IdArg::Int(i),
            Err(_) => IdArg::Text(id.to_string()),
        }
    }
}

impl From<i64> for IdArg {
    fn from(id: i64) -> Self {
        IdArg::Int(id)
    }
}

impl From<i32> for IdArg {
    fn from(id: i32) -> Self {
        IdArg::Int(id.into())
    }
}

impl From<u32> for IdArg {
    fn from(id: u32) -> Self {
        IdArg::Int(id.into())
    }
}

impl From<&str> for IdArg {
    fn from(id: &str) -> Self {
        IdArg::Text(id.to_string())
    }
}

impl From<String> for IdArg {
    fn from(id: String) -> Self {
        IdArg::Text(id)
    }
}

impl<T: Into<IdArg>> From<Option<T>> for IdArg {
    fn from(id: Option<T>) -> Self {
        id.map_or(IdArg::Missing, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_and_numeric_strings_agree() {
        assert!(IdArg::from(2).matches(2));
        assert!(IdArg::from("2").matches(2));
        assert!(IdArg::from(" 2 ").matches(2));
        assert!(IdArg::from("2.0").matches(2));
        assert!(IdArg::from("+2").matches(2));
        assert!(loose_eq(&IdArg::from(String::from("7")), 7));
    }

    #[test]
    fn non_numeric_never_matches() {
        assert!(!IdArg::from("").matches(0));
        assert!(!IdArg::from("two").matches(2));
        assert!(!IdArg::from("2.5").matches(2));
        assert!(!IdArg::from(-1).matches(1));
        assert!(!IdArg::Missing.matches(0));
    }

    #[test]
    fn canonical_forms() {
        assert_eq!(IdArg::from(5u64).canonical(), Some(5));
        assert_eq!(IdArg::from("0").canonical(), Some(0));
        assert_eq!(IdArg::from("1e3").canonical(), Some(1000));
        assert_eq!(IdArg::from("NaN").canonical(), None);
        assert_eq!(IdArg::from("-4").canonical(), None);
        assert_eq!(IdArg::from(u64::MAX).canonical(), Some(u64::MAX));
    }

    #[test]
    fn option_maps_to_missing() {
        assert_eq!(IdArg::from(None::<u64>), IdArg::Missing);
        assert_eq!(IdArg::from(Some(3)), IdArg::Int(3));
        assert!(IdArg::from(None::<&str>).is_missing());
    }

    #[test]
    fn from_json_values() {
        assert_eq!(IdArg::from_json(&json!(null)), IdArg::Missing);
        assert_eq!(IdArg::from_json(&json!(3)), IdArg::Int(3));
        assert_eq!(IdArg::from_json(&json!("3")), IdArg::Text("3".into()));
        assert!(IdArg::from_json(&json!(3.0)).matches(3));
        assert!(!IdArg::from_json(&json!(true)).matches(1));
    }

    #[test]
    fn display_keeps_caller_spelling() {
        assert_eq!(IdArg::from(99).to_string(), "99");
        assert_eq!(IdArg::from("007").to_string(), "007");
        assert_eq!(IdArg::Missing.to_string(), "undefined");
    }
}
