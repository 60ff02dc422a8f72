//! Explicit JSON encoding for the persisted train file.
//!
//! Each entity maps itself to and from a [`serde_json::Value`] by hand so the
//! on-disk layout stays exactly the documented one, independent of how the
//! Rust types are shaped.

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while turning JSON back into model types.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum DecodeError {
    /// The text is not valid JSON.
    #[error("invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("missing field '{field}'")]
    MissingField { field: String },

    /// Present, but of the wrong JSON type or out of range.
    #[error("field '{field}' must be {expected}")]
    InvalidType {
        field: String,
        expected: &'static str,
    },

    #[error("field '{field}' has unknown value '{value}'")]
    UnknownVariant { field: String, value: String },
}

/// A model type with an explicit JSON representation.
pub trait Record: Sized {
    /// Encode into the persisted JSON shape.
    fn encode(&self) -> Value;

    /// Decode from the persisted JSON shape. `path` is the dotted location of
    /// `value` inside the document and is used for error reporting.
    fn decode_at(value: &Value, path: &str) -> Result<Self, DecodeError>;

    /// Decode a top-level value.
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        Self::decode_at(value, "")
    }
}

/// Borrowed view over a JSON object that resolves fields relative to a path.
pub(crate) struct Fields<'a> {
    map: &'a Map<String, Value>,
    path: &'a str,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(value: &'a Value, path: &'a str) -> Result<Self, DecodeError> {
        let map = value.as_object().ok_or_else(|| DecodeError::InvalidType {
            field: display_path(path),
            expected: "an object",
        })?;
        Ok(Self { map, path })
    }

    pub(crate) fn path_of(&self, key: &str) -> String {
        join_path(self.path, key)
    }

    fn get(&self, key: &str) -> Result<&'a Value, DecodeError> {
        self.map.get(key).ok_or_else(|| DecodeError::MissingField {
            field: self.path_of(key),
        })
    }

    fn invalid(&self, key: &str, expected: &'static str) -> DecodeError {
        DecodeError::InvalidType {
            field: self.path_of(key),
            expected,
        }
    }

    pub(crate) fn string(&self, key: &str) -> Result<&'a str, DecodeError> {
        self.get(key)?
            .as_str()
            .ok_or_else(|| self.invalid(key, "a string"))
    }

    pub(crate) fn u32(&self, key: &str) -> Result<u32, DecodeError> {
        self.get(key)?
            .as_u64()
            .and_then(|value| u32::try_from(value).ok())
            .ok_or_else(|| self.invalid(key, "a non-negative 32-bit integer"))
    }

    pub(crate) fn bool(&self, key: &str) -> Result<bool, DecodeError> {
        self.get(key)?
            .as_bool()
            .ok_or_else(|| self.invalid(key, "a boolean"))
    }

    pub(crate) fn array(&self, key: &str) -> Result<&'a [Value], DecodeError> {
        self.get(key)?
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| self.invalid(key, "an array"))
    }

    /// Returns `None` for an explicit `null`; the key itself must be present.
    pub(crate) fn nullable(&self, key: &str) -> Result<Option<&'a Value>, DecodeError> {
        let value = self.get(key)?;
        Ok((!value.is_null()).then_some(value))
    }

    /// Parse a string field through `parse`, reporting unknown labels.
    pub(crate) fn label<T>(
        &self,
        key: &str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<T, DecodeError> {
        let raw = self.string(key)?;
        parse(raw).ok_or_else(|| DecodeError::UnknownVariant {
            field: self.path_of(key),
            value: raw.to_string(),
        })
    }
}

/// Decode every element of a JSON array, tagging errors with the index.
pub(crate) fn decode_list<T: Record>(items: &[Value], path: &str) -> Result<Vec<T>, DecodeError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| T::decode_at(item, &format!("{path}[{index}]")))
        .collect()
}

fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_errors_carry_nested_path() {
        let value = json!({ "power": -5, "name": 7 });
        let fields = Fields::new(&value, "locomotive").unwrap();

        match fields.u32("power") {
            Err(DecodeError::InvalidType { field, .. }) => assert_eq!(field, "locomotive.power"),
            other => panic!("unexpected result: {other:?}"),
        }
        match fields.string("serial_number") {
            Err(DecodeError::MissingField { field }) => {
                assert_eq!(field, "locomotive.serial_number")
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            fields.string("name"),
            Err(DecodeError::InvalidType { .. })
        ));
    }

    #[test]
    fn root_must_be_an_object() {
        let value = json!([1, 2, 3]);
        match Fields::new(&value, "") {
            Err(DecodeError::InvalidType { field, .. }) => assert_eq!(field, "<root>"),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("array accepted as object"),
        }
    }

    #[test]
    fn integers_outside_u32_are_rejected() {
        let value = json!({ "number": 4_294_967_296u64, "ok": 4_294_967_295u64 });
        let fields = Fields::new(&value, "").unwrap();
        assert!(fields.u32("number").is_err());
        assert_eq!(fields.u32("ok").unwrap(), u32::MAX);
    }

    #[test]
    fn nullable_distinguishes_null_from_missing() {
        let value = json!({ "locomotive": null });
        let fields = Fields::new(&value, "").unwrap();
        assert!(fields.nullable("locomotive").unwrap().is_none());
        assert!(matches!(
            fields.nullable("other"),
            Err(DecodeError::MissingField { .. })
        ));
    }
}
