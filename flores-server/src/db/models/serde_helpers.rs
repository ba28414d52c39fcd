//! Common serde helpers for record ids and null-tolerant booleans
//!
//! Record ids are accepted in two formats:
//! - string format `"table:id"` (from API JSON)
//! - SurrealDB native format (from the database)
//!
//! They always serialize back to the `"table:id"` string format.

use serde::{Deserialize, Deserializer, Serializer};
use surrealdb::RecordId;

/// Deserialize bool that treats null as true
pub fn bool_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(true))
}

/// Render a record id as `table:key`, without SurrealDB's angle-bracket
/// escaping of keys that start with a digit.
pub fn record_id_to_string(id: &RecordId) -> String {
    let key = id.key().to_string();
    let key = key.trim_matches(|c| c == '⟨' || c == '⟩');
    format!("{}:{}", id.table(), key)
}

fn record_id_from_str<E: serde::de::Error>(value: &str) -> Result<RecordId, E> {
    match value.split_once(':') {
        Some((table, key)) if !table.is_empty() && !key.is_empty() => {
            let key = key.trim_matches(|c| c == '⟨' || c == '⟩');
            Ok(RecordId::from_table_key(table, key))
        }
        _ => Err(E::custom(format!("invalid record id: {}", value))),
    }
}

/// Internal helper: supports both string and native RecordId formats
#[derive(Debug, Clone)]
struct FlexibleRecordId(RecordId);

impl<'de> Deserialize<'de> for FlexibleRecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        use std::fmt;

        struct FlexibleVisitor;

        impl<'de> Visitor<'de> for FlexibleVisitor {
            type Value = FlexibleRecordId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string 'table:id' or RecordId")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                record_id_from_str(value).map(FlexibleRecordId)
            }

            fn visit_map<M>(self, map: M) -> Result<Self::Value, M::Error>
            where
                M: de::MapAccess<'de>,
            {
                // Delegate to the native RecordId deserialization
                RecordId::deserialize(de::value::MapAccessDeserializer::new(map))
                    .map(FlexibleRecordId)
            }
        }

        deserializer.deserialize_any(FlexibleVisitor)
    }
}

/// RecordId serialization as a `"table:id"` string
pub mod record_id {
    use super::*;

    pub fn serialize<S>(id: &RecordId, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&record_id_to_string(id))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<RecordId, D::Error>
    where
        D: Deserializer<'de>,
    {
        FlexibleRecordId::deserialize(deserializer).map(|f| f.0)
    }
}

/// Option<RecordId> serialization as an optional `"table:id"` string
pub mod option_record_id {
    use super::*;

    pub fn serialize<S>(id: &Option<RecordId>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match id {
            Some(id) => s.serialize_some(&record_id_to_string(id)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<RecordId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<FlexibleRecordId>::deserialize(deserializer)
            .map(|opt| opt.map(|f| f.0))
    }
}

/// Vec<RecordId> serialization as a list of `"table:id"` strings
pub mod vec_record_id {
    use super::*;

    pub fn serialize<S>(ids: &[RecordId], s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_seq(ids.iter().map(|id| record_id_to_string(id)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<RecordId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<FlexibleRecordId>::deserialize(deserializer)
            .map(|v| v.into_iter().map(|f| f.0).collect())
    }
}
