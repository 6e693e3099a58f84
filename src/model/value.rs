//! Property values as they come back from the graph store.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Neo4j-compatible property value.
///
/// Integers are Neo4j's 64-bit `Integer`. Temporal values keep their
/// Neo4j flavour so the view layer can decide how to render them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(HashMap<String, Value>),

    // Temporal types
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    LocalDateTime(NaiveDateTime),

    // Spatial types
    Point2D { srid: i32, x: f64, y: f64 },
}

// ============================================================================
// Type checking
// ============================================================================

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Bool(_) => "BOOLEAN",
            Value::Int(_) => "INTEGER",
            Value::Float(_) => "FLOAT",
            Value::String(_) => "STRING",
            Value::List(_) => "LIST",
            Value::Map(_) => "MAP",
            Value::Date(_) => "DATE",
            Value::DateTime(_) => "DATETIME",
            Value::LocalDateTime(_) => "LOCAL_DATETIME",
            Value::Point2D { .. } => "POINT",
        }
    }

    /// Presence test used by every guarded field access.
    ///
    /// `Null`, `false` and the empty string count as absent. Integers are
    /// always present, zero included: the store hands them out as wrapper
    /// objects, so a stored `0` still counts as "set".
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempt to extract as i64
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    /// Attempt to extract as f64
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Attempt to extract as &str
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Lower 32-bit word of an integer, sign-extended back to i64.
    ///
    /// Values outside `i32` wrap.
    pub fn low_word(&self) -> Option<i64> {
        self.as_int().map(|i| i64::from(i as i32))
    }

    /// Interpret a temporal value (or an RFC 3339 string) as a UTC instant.
    ///
    /// Local datetimes are taken as UTC; dates as midnight UTC.
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            Value::LocalDateTime(dt) => Some(dt.and_utc()),
            Value::Date(d) => d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()),
            Value::String(s) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            _ => None,
        }
    }

    /// Text form of scalar identifiers: strings verbatim, numbers in decimal.
    pub fn to_id_string(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            _ => None,
        }
    }

    /// Plain JSON rendering for response bodies (no type tags).
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => json!(b),
            Value::Int(i) => json!(i),
            Value::Float(f) => json!(f),
            Value::String(s) => json!(s),
            Value::List(l) => serde_json::Value::Array(l.iter().map(Value::to_json).collect()),
            Value::Map(m) => serde_json::Value::Object(
                m.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            Value::Date(d) => json!(d.to_string()),
            Value::DateTime(dt) => json!(dt.to_rfc3339()),
            Value::LocalDateTime(dt) => json!(dt.to_string()),
            Value::Point2D { srid, x, y } => json!({ "srid": srid, "x": x, "y": y }),
        }
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<bool> for Value { fn from(v: bool) -> Self { Value::Bool(v) } }
impl From<i32> for Value { fn from(v: i32) -> Self { Value::Int(v as i64) } }
impl From<i64> for Value { fn from(v: i64) -> Self { Value::Int(v) } }
impl From<f64> for Value { fn from(v: f64) -> Self { Value::Float(v) } }
impl From<String> for Value { fn from(v: String) -> Self { Value::String(v) } }
impl From<&str> for Value { fn from(v: &str) -> Self { Value::String(v.to_owned()) } }
impl From<DateTime<Utc>> for Value { fn from(v: DateTime<Utc>) -> Self { Value::DateTime(v) } }
impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self { Value::List(v.into_iter().map(Into::into).collect()) }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or(Value::Null) }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
            Value::List(l) => {
                write!(f, "[")?;
                for (i, v) in l.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            Value::Map(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::Date(d) => write!(f, "{d}"),
            Value::DateTime(dt) => write!(f, "{dt}"),
            Value::LocalDateTime(dt) => write!(f, "{dt}"),
            Value::Point2D { x, y, srid } => write!(f, "point({{srid: {srid}, x: {x}, y: {y}}})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_from() {
        assert_eq!(Value::from("hello"), Value::String("hello".into()));
        assert_eq!(Value::from(42), Value::Int(42));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(None::<i64>), Value::Null);
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        // stored integers are wrapper objects upstream, so zero is "set"
        assert!(Value::Int(0).is_truthy());
        assert!(Value::from("x").is_truthy());
    }

    #[test]
    fn test_low_word() {
        assert_eq!(Value::Int(12345).low_word(), Some(12345));
        assert_eq!(Value::Int(-7).low_word(), Some(-7));
        assert_eq!(Value::Int((1i64 << 32) + 5).low_word(), Some(5));
        assert_eq!(Value::from("12").low_word(), None);
    }

    #[test]
    fn test_as_datetime() {
        let v = Value::from("2020-10-01T12:30:00Z");
        let dt = v.as_datetime().unwrap();
        assert_eq!(dt.to_rfc3339(), "2020-10-01T12:30:00+00:00");

        let d = Value::Date(NaiveDate::from_ymd_opt(2020, 10, 1).unwrap());
        assert_eq!(d.as_datetime().unwrap(), dt.date_naive().and_hms_opt(0, 0, 0).unwrap().and_utc());

        assert_eq!(Value::from("not a date").as_datetime(), None);
    }

    #[test]
    fn test_to_json_is_untagged() {
        let v = Value::Point2D { srid: 4326, x: -87.6, y: 41.8 };
        assert_eq!(v.to_json(), json!({ "srid": 4326, "x": -87.6, "y": 41.8 }));
        assert_eq!(Value::from(vec![1i64, 2]).to_json(), json!([1, 2]));
        assert_eq!(Value::Null.to_json(), serde_json::Value::Null);
    }

    #[test]
    fn test_id_string() {
        assert_eq!(Value::Int(99).to_id_string().as_deref(), Some("99"));
        assert_eq!(Value::from("abc").to_id_string().as_deref(), Some("abc"));
        assert_eq!(Value::Null.to_id_string(), None);
    }
}
