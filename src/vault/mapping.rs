//! The decrypted vault content: an ordered name -> value mapping.
//!
//! Values are arbitrary JSON.  In practice they are strings, sometimes
//! lists of strings, but nothing here assumes a shape.

use std::borrow::Cow;
use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::Value;

use crate::errors::{MumsError, Result};

/// Entry name -> value, in insertion order.
pub type VaultMapping = serde_json::Map<String, Value>;

/// JSON formatter using `", "` and `": "` separators.
///
/// Matches the text older vaults were written with, so a dump of the
/// plaintext looks the same regardless of which tool wrote it.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Serialize a mapping deterministically (insertion order, spaced separators).
pub fn to_json(mapping: &VaultMapping) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    mapping
        .serialize(&mut ser)
        .map_err(|e| MumsError::SerializationError(format!("vault mapping: {e}")))?;
    String::from_utf8(buf)
        .map_err(|e| MumsError::SerializationError(format!("vault mapping: {e}")))
}

/// Parse decrypted vault text into a mapping.
pub fn from_json(text: &str) -> Result<VaultMapping> {
    serde_json::from_str(text).map_err(|e| {
        MumsError::SerializationError(format!("vault content is not a JSON object: {e}"))
    })
}

/// Render a value as an environment variable value.
///
/// Strings are used verbatim; anything else becomes its compact JSON text.
pub fn env_value(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

/// Short human-readable name for the shape of a value.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Array(items) if items.iter().all(Value::is_string) => "list",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
        Value::Number(_) => "number",
        Value::Bool(_) => "bool",
        Value::Null => "null",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> VaultMapping {
        let mut m = VaultMapping::new();
        m.insert("Key1".into(), json!("Value1"));
        m.insert("Key5".into(), json!(["12345", "67890"]));
        m
    }

    #[test]
    fn to_json_uses_spaced_separators() {
        assert_eq!(
            to_json(&sample()).unwrap(),
            r#"{"Key1": "Value1", "Key5": ["12345", "67890"]}"#
        );
    }

    #[test]
    fn empty_mapping_serializes_to_braces() {
        assert_eq!(to_json(&VaultMapping::new()).unwrap(), "{}");
    }

    #[test]
    fn from_json_accepts_compact_and_spaced_text() {
        let spaced = from_json(r#"{"Key1": "Value1", "Key5": ["12345", "67890"]}"#).unwrap();
        let compact = from_json(r#"{"Key1":"Value1","Key5":["12345","67890"]}"#).unwrap();
        assert_eq!(spaced, sample());
        assert_eq!(compact, sample());
    }

    #[test]
    fn from_json_preserves_key_order() {
        let m = from_json(r#"{"Z": "1", "A": "2", "M": "3"}"#).unwrap();
        let keys: Vec<&str> = m.keys().map(String::as_str).collect();
        assert_eq!(keys, ["Z", "A", "M"]);
    }

    #[test]
    fn from_json_rejects_non_objects() {
        assert!(from_json("[1, 2]").is_err());
        assert!(from_json("not json").is_err());
    }

    #[test]
    fn env_value_renders_strings_verbatim() {
        assert_eq!(env_value(&json!("a b ")), "a b ");
        assert_eq!(env_value(&json!(["x", "y"])), r#"["x","y"]"#);
        assert_eq!(env_value(&json!(42)), "42");
    }

    #[test]
    fn value_kind_names_shapes() {
        assert_eq!(value_kind(&json!("s")), "string");
        assert_eq!(value_kind(&json!(["a"])), "list");
        assert_eq!(value_kind(&json!([1])), "array");
        assert_eq!(value_kind(&json!(null)), "null");
    }
}
