//! Schema-flexible records stored in partitions
//!
//! A [`Record`] is a JSON object. Its schema depends on the partition
//! (a lesson has `title`/`content`/`chapter`/`difficulty`, a vocabulary entry
//! has `telugu`/`english`/`category`, ...) and is not enforced here beyond
//! the presence of the partition's identifier field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::errors::DomainError;
use super::newtypes::RecordId;
use super::partition::Partition;

/// Field set on locally generated placeholder records
pub const SYNTHETIC_FIELD: &str = "synthetic";

/// A single record: string field names mapped to JSON values
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, JsonValue>);

impl Record {
    /// Creates a record from a JSON object map
    pub fn new(fields: Map<String, JsonValue>) -> Self {
        Self(fields)
    }

    /// Creates a record from an arbitrary JSON value
    ///
    /// # Errors
    /// Returns `DomainError::InvalidRecord` if the value is not an object
    pub fn from_value(value: JsonValue) -> Result<Self, DomainError> {
        match value {
            JsonValue::Object(map) => Ok(Self(map)),
            other => Err(DomainError::InvalidRecord(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Returns the identifier of this record within `partition`
    ///
    /// # Errors
    /// Returns `DomainError::MissingIdentifier` when the identifier field is
    /// absent, or `DomainError::InvalidId` when its value is unusable
    pub fn identifier(&self, partition: Partition) -> Result<RecordId, DomainError> {
        let field = partition.key_field();
        let value = self
            .0
            .get(field)
            .ok_or(DomainError::MissingIdentifier { partition, field })?;
        RecordId::from_json(value)
    }

    /// Returns a field value
    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.0.get(field)
    }

    /// Sets a field value, returning the previous one
    pub fn insert(&mut self, field: impl Into<String>, value: JsonValue) -> Option<JsonValue> {
        self.0.insert(field.into(), value)
    }

    /// Returns true if the record was generated locally as a placeholder
    pub fn is_synthetic(&self) -> bool {
        matches!(self.0.get(SYNTHETIC_FIELD), Some(JsonValue::Bool(true)))
    }

    /// Tags the record as a locally generated placeholder
    pub fn mark_synthetic(&mut self) {
        self.0
            .insert(SYNTHETIC_FIELD.to_string(), JsonValue::Bool(true));
    }

    /// Borrow the underlying field map
    pub fn fields(&self) -> &Map<String, JsonValue> {
        &self.0
    }

    /// Converts the record into a JSON value
    pub fn into_value(self) -> JsonValue {
        JsonValue::Object(self.0)
    }
}

impl From<Map<String, JsonValue>> for Record {
    fn from(map: Map<String, JsonValue>) -> Self {
        Self(map)
    }
}

impl TryFrom<JsonValue> for Record {
    type Error = DomainError;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
