//! The document value model both inputs are decoded into before comparison.
//!
//! `Value` mirrors JSON types but separates integers from floats (the
//! comparator treats them as numerically comparable, not identical) and adds
//! a `Bytes` variant for MessagePack binary payloads. Objects use `BTreeMap`:
//! key order is irrelevant to comparison, and the sorted iteration gives
//! deterministic output for dumps and set-style walks.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};

/// A decoded document node.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// MessagePack binary payload. Rendered as decoded text on output.
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    /// Keys unique within one object; MessagePack integer keys are stored
    /// in decimal string form.
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Short type tag used in change-record output.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "str",
            Value::Bytes(_) => "bytes",
            Value::Array(_) => "list",
            Value::Object(_) => "object",
        }
    }
}

/// Bare display form: scalars without quotes (change records add their own),
/// containers in a compact bracketed notation.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => f.write_str(s),
            Value::Bytes(b) => f.write_str(&String::from_utf8_lossy(b)),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::String(s) => serializer.serialize_str(s),
            // Binary payloads are re-serialized as decoded text, never as
            // raw byte arrays.
            Value::Bytes(b) => serializer.serialize_str(&String::from_utf8_lossy(b)),
            Value::Array(items) => serializer.collect_seq(items),
            Value::Object(map) => serializer.collect_map(map),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

/// One visitor serves both `serde_json` and `rmp_serde`. The format drives
/// which hooks fire: JSON never produces `visit_bytes`, MessagePack maps may
/// produce non-string keys (folded to strings by [`Value::into_key`]).
struct ValueVisitor;

impl Value {
    /// Fold an arbitrary decoded key into the string key space of `Object`.
    fn into_key(self) -> String {
        match self {
            Value::String(s) => s,
            Value::Bytes(b) => String::from_utf8_lossy(&b).into_owned(),
            other => other.to_string(),
        }
    }
}

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("any document value")
    }

    fn visit_bool<E>(self, b: bool) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E>(self, n: i64) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Integer(n))
    }

    fn visit_u64<E>(self, n: u64) -> Result<Value, E>
    where
        E: de::Error,
    {
        // Integers past i64::MAX fall back to the float domain rather than
        // failing the whole decode.
        i64::try_from(n)
            .map(Value::Integer)
            .or(Ok(Value::Float(n as f64)))
    }

    fn visit_f64<E>(self, x: f64) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Float(x))
    }

    fn visit_str<E>(self, s: &str) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::String(s.to_owned()))
    }

    fn visit_string<E>(self, s: String) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::String(s))
    }

    fn visit_bytes<E>(self, b: &[u8]) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Bytes(b.to_vec()))
    }

    fn visit_byte_buf<E>(self, b: Vec<u8>) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Bytes(b))
    }

    fn visit_unit<E>(self) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Deserialize::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = BTreeMap::new();
        while let Some((key, value)) = map.next_entry::<Value, Value>()? {
            // Duplicate keys: last entry wins, same as a JSON object decode.
            entries.insert(key.into_key(), value);
        }
        Ok(Value::Object(entries))
    }

    fn visit_i128<E>(self, n: i128) -> Result<Value, E>
    where
        E: de::Error,
    {
        i64::try_from(n)
            .map(Value::Integer)
            .or(Ok(Value::Float(n as f64)))
    }

    fn visit_u128<E>(self, n: u128) -> Result<Value, E>
    where
        E: de::Error,
    {
        i64::try_from(n)
            .map(Value::Integer)
            .or(Ok(Value::Float(n as f64)))
    }
}
