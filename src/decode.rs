//! Typed decoding of the JSON-encoded string properties.
//!
//! Addresses, triplee lists and payout errors are stored as JSON text on the
//! node. They are decoded exactly once, here, into typed structures. A falsy
//! field decodes to `None`; text that is not valid JSON for the target type is
//! a data-integrity error naming the field.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::model::Record;
use crate::{Error, Result};

/// Legacy address fix-up: the first `#` in the raw text becomes `no.`.
pub const HASH_FIXUP: (&str, &str) = ("#", "no.");

/// Whether to apply [`HASH_FIXUP`] before decoding an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFixup {
    HashToNo,
    Verbatim,
}

/// A postal address as stored on ambassadors and triplers.
///
/// Keys other than the four display keys are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Address {
    /// A part by its stored key; unknown keys are looked up in `extra`.
    pub fn part(&self, key: &str) -> Option<&str> {
        match key {
            "address1" => self.address1.as_deref(),
            "city" => self.city.as_deref(),
            "state" => self.state.as_deref(),
            "zip" => self.zip.as_deref(),
            other => self.extra.get(other).and_then(serde_json::Value::as_str),
        }
    }
}

/// Someone a tripler has pledged to bring to the polls.
///
/// Entries were written by several client versions; any part may be missing,
/// null or a non-string scalar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Triplee {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub housemate: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Decode a JSON-encoded string field into `T`.
///
/// Missing or falsy fields yield `Ok(None)`. A present non-string field is
/// [`Error::TypeError`]; text that does not decode is [`Error::MalformedField`].
pub fn json_field<T, R>(record: &R, field: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    R: Record + ?Sized,
{
    let Some(value) = record.present(field) else {
        return Ok(None);
    };
    let Some(text) = value.as_str() else {
        return Err(Error::TypeError {
            expected: format!("JSON string in `{field}`"),
            got: value.type_name().to_string(),
        });
    };
    parse(field, text).map(Some)
}

/// Decode the `address` field, optionally applying the legacy fix-up.
pub fn address<R>(record: &R, fixup: AddressFixup) -> Result<Option<Address>>
where
    R: Record + ?Sized,
{
    const FIELD: &str = "address";
    match fixup {
        AddressFixup::Verbatim => json_field(record, FIELD),
        AddressFixup::HashToNo => {
            let Some(value) = record.present(FIELD) else {
                return Ok(None);
            };
            let Some(text) = value.as_str() else {
                return Err(Error::TypeError {
                    expected: format!("JSON string in `{FIELD}`"),
                    got: value.type_name().to_string(),
                });
            };
            let (from, to) = HASH_FIXUP;
            parse(FIELD, &text.replacen(from, to, 1)).map(Some)
        }
    }
}

pub fn triplees<R>(record: &R) -> Result<Option<Vec<Triplee>>>
where
    R: Record + ?Sized,
{
    json_field(record, "triplees")
}

/// Text form of a loosely typed part: null is `None`, strings pass through
/// and any other value keeps its JSON text (`60601`, `true`).
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

fn parse<T: DeserializeOwned>(field: &str, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|source| {
        tracing::warn!(field, error = %source, "stored JSON field failed to decode");
        Error::MalformedField { field: field.to_string(), source }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{props, PropertyMap, Value};
    use pretty_assertions::assert_eq;

    fn row(key: &str, value: impl Into<Value>) -> PropertyMap {
        props([(key, value.into())])
    }

    #[test]
    fn test_hash_fixup_applies_to_first_occurrence() {
        let r = row("address", r##"{"address1":"#12 Main","city":"Apt #4"}"##);
        let a = address(&r, AddressFixup::HashToNo).unwrap().unwrap();
        assert_eq!(a.address1.as_deref(), Some("no.12 Main"));
        assert_eq!(a.city.as_deref(), Some("Apt #4"));
    }

    #[test]
    fn test_verbatim_keeps_hash() {
        let r = row("address", r##"{"address1":"#12 Main"}"##);
        let a = address(&r, AddressFixup::Verbatim).unwrap().unwrap();
        assert_eq!(a.address1.as_deref(), Some("#12 Main"));
    }

    #[test]
    fn test_falsy_field_is_none() {
        assert_eq!(address(&PropertyMap::new(), AddressFixup::HashToNo).unwrap(), None);
        assert_eq!(address(&row("address", ""), AddressFixup::Verbatim).unwrap(), None);
        assert_eq!(triplees(&row("triplees", Value::Null)).unwrap(), None);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = address(&row("address", "{not json"), AddressFixup::Verbatim).unwrap_err();
        assert!(matches!(err, Error::MalformedField { ref field, .. } if field == "address"));
    }

    #[test]
    fn test_non_string_field_is_type_error() {
        let err = triplees(&row("triplees", 5i64)).unwrap_err();
        assert!(matches!(err, Error::TypeError { .. }));
    }

    #[test]
    fn test_extra_address_keys_survive() {
        let r = row("address", r#"{"address1":"1 Elm","address2":"Unit 3"}"#);
        let a = address(&r, AddressFixup::Verbatim).unwrap().unwrap();
        let back = serde_json::to_value(&a).unwrap();
        assert_eq!(back, serde_json::json!({ "address1": "1 Elm", "address2": "Unit 3" }));
    }

    #[test]
    fn test_address_part_by_key() {
        let r = row("address", r#"{"address1":"1 Elm","zip":60601,"address2":"Unit 3"}"#);
        let a = address(&r, AddressFixup::Verbatim).unwrap().unwrap();
        let parts: Vec<Option<&str>> = crate::format::ADDRESS_KEYS.iter().map(|k| a.part(k)).collect();
        assert_eq!(parts, vec![Some("1 Elm"), None, None, Some("60601")]);
        assert_eq!(a.part("address2"), Some("Unit 3"));
    }

    #[test]
    fn test_numeric_zip() {
        let r = row("address", r#"{"city":"Chicago","zip":60601}"#);
        let a = address(&r, AddressFixup::Verbatim).unwrap().unwrap();
        assert_eq!(a.zip.as_deref(), Some("60601"));
    }

    #[test]
    fn test_triplees_decode() {
        let r = row(
            "triplees",
            r#"[{"first_name":"Ann","last_name":"Lee","housemate":"Yes"},{"first_name":"Bo","last_name":"Kim"}]"#,
        );
        let list = triplees(&r).unwrap().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].housemate.as_deref(), Some("Yes"));
        assert_eq!(list[1].housemate, None);
    }

    #[test]
    fn test_triplee_parts_tolerate_null_and_scalars() {
        let r = row(
            "triplees",
            r#"[{"first_name":"Ann","last_name":null,"housemate":true},{"first_name":7,"housemate":"No"}]"#,
        );
        let list = triplees(&r).unwrap().unwrap();
        assert_eq!(list[0].first_name.as_deref(), Some("Ann"));
        assert_eq!(list[0].last_name, None);
        assert_eq!(list[0].housemate.as_deref(), Some("true"));
        assert_eq!(list[1].first_name.as_deref(), Some("7"));
        assert_eq!(list[1].last_name, None);
    }
}
