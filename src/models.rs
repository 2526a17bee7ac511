use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

use crate::error::FetchFailure;

pub type ModelStates = HashMap<ModelId, ModelState>;

/// Map key for a model. String and integer ids share one key space, so
/// `1` and `"1"` index the same entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ModelId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<i64> for ModelId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

/// The `id` of a record exactly as the backend sent it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RecordId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl RecordId {
    pub fn key(&self) -> ModelId {
        match self {
            RecordId::Text(s) => ModelId(s.clone()),
            RecordId::Signed(n) => ModelId(n.to_string()),
            RecordId::Unsigned(n) => ModelId(n.to_string()),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Text(s) => write!(f, "{:?}", s),
            RecordId::Signed(n) => write!(f, "{}", n),
            RecordId::Unsigned(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::Text(s)
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Signed(n)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(RecordId::Text(s)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(RecordId::Signed(i))
                } else if let Some(u) = n.as_u64() {
                    Ok(RecordId::Unsigned(u))
                } else {
                    Err(de::Error::custom(format!(
                        "id must be a string or an integer, found {}",
                        n
                    )))
                }
            }
            other => Err(de::Error::custom(format!(
                "id must be a string or an integer, found {}",
                other
            ))),
        }
    }
}

/// One model record as served by the backend. Everything other than `id`
/// is kept verbatim and never interpreted by the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelState {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ModelState {
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn key(&self) -> ModelId {
        self.id.key()
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn model_name(&self) -> Option<&str> {
        self.field("model_name").and_then(Value::as_str)
    }

    pub fn is_trained(&self) -> Option<bool> {
        self.field("is_trained").and_then(Value::as_bool)
    }

    pub fn target_name(&self) -> Option<&str> {
        self.field("target_name").and_then(Value::as_str)
    }
}

#[derive(Deserialize)]
struct ModelListBody {
    models: Value,
}

/// Decode a `GET /models/list` body.
///
/// `models` is either a list of records, keyed by each record's `id`, or an
/// object keyed by id. In the keyed form a record without `id` takes the map
/// key, and a record whose `id` disagrees with its key is rejected.
pub fn decode_model_list(body: &[u8]) -> Result<ModelStates, FetchFailure> {
    let body: ModelListBody =
        serde_json::from_slice(body).map_err(|e| FetchFailure::Malformed(e.to_string()))?;

    match body.models {
        Value::Array(records) => records
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                let state: ModelState = serde_json::from_value(record)
                    .map_err(|e| FetchFailure::Malformed(format!("models[{}]: {}", i, e)))?;
                Ok((state.key(), state))
            })
            .collect(),
        Value::Object(records) => records
            .into_iter()
            .map(|(key, record)| decode_keyed_record(key, record))
            .collect(),
        other => Err(FetchFailure::Malformed(format!(
            "`models` must be a list or an object, found {}",
            json_kind(&other)
        ))),
    }
}

fn decode_keyed_record(key: String, record: Value) -> Result<(ModelId, ModelState), FetchFailure> {
    let mut record = match record {
        Value::Object(map) => map,
        other => {
            return Err(FetchFailure::Malformed(format!(
                "models[{:?}]: expected an object, found {}",
                key,
                json_kind(&other)
            )))
        }
    };
    record
        .entry("id")
        .or_insert_with(|| Value::String(key.clone()));

    let state: ModelState = serde_json::from_value(Value::Object(record))
        .map_err(|e| FetchFailure::Malformed(format!("models[{:?}]: {}", key, e)))?;

    let id = ModelId(key);
    if state.key() != id {
        return Err(FetchFailure::Malformed(format!(
            "models[{:?}]: record id {} does not match its key",
            id.as_str(),
            state.id
        )));
    }
    Ok((id, state))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
