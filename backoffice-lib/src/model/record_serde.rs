//! JSON bridge for Record and Value.
//!
//! ## Read Format (Deserialization)
//!
//! List endpoints return plain JSON objects. The identifier arrives as `_id`
//! (document stores) or `id` (mock data); `_id` wins when both are present.
//! Numeric ids are rendered to strings. The id key also stays in the field
//! map so it can be sorted and searched like any other column.
//!
//! ## Write Format (Serialization)
//!
//! Fields serialize as a flat object. Nested records become nested objects,
//! date-times become RFC 3339 strings. If the record has an id that is not
//! already present as a field, it is written as `_id`.

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

use super::Record;
use super::RecordId;
use super::Value;

const ID_KEYS: [&str; 2] = ["_id", "id"];

// =============================================================================
// Serialization (for writes)
// =============================================================================

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let emit_id = self.id.is_some() && !ID_KEYS.iter().any(|k| self.fields.contains_key(*k));
        let len = self.fields.len() + usize::from(emit_id);
        let mut map = serializer.serialize_map(Some(len))?;

        if emit_id && let Some(id) = &self.id {
            map.serialize_entry("_id", id)?;
        }
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }

        map.end()
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::DateTime(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            Value::List(items) => items.serialize(serializer),
            Value::Record(record) => record.serialize(serializer),
        }
    }
}

// =============================================================================
// Deserialization (from responses)
// =============================================================================

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON object")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut object = serde_json::Map::new();
        while let Some((key, value)) = access.next_entry::<String, serde_json::Value>()? {
            object.insert(key, value);
        }
        Ok(Record::from_json_object(object))
    }
}

impl Record {
    /// Builds a record from a decoded JSON object.
    pub fn from_json_object(object: serde_json::Map<String, serde_json::Value>) -> Self {
        let id = ID_KEYS
            .iter()
            .find_map(|key| object.get(*key).and_then(json_id));

        let fields = object
            .into_iter()
            .map(|(key, value)| (key, Value::from(value)))
            .collect();

        Self { id, fields }
    }
}

fn json_id(value: &serde_json::Value) -> Option<RecordId> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(RecordId::new(s.as_str())),
        serde_json::Value::Number(n) => Some(RecordId::new(n.to_string())),
        _ => None,
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(object) => {
                let mut nested = Record::from_json_object(object);
                // Nested objects are plain values, not addressable rows.
                nested.id = None;
                Value::Record(Box::new(nested))
            }
        }
    }
}
