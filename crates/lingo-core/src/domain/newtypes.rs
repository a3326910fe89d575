//! Domain newtypes with validation
//!
//! Strongly-typed wrappers for identifiers. Each newtype ensures data
//! validity at construction time.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::errors::DomainError;

/// Identifier of a record within its partition
///
/// Remote content uses both string and integer identifiers; both normalize
/// to the same non-empty string form so `"7"` and `7` address one record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Create a new RecordId
    ///
    /// # Errors
    /// Returns error if the identifier is empty or only whitespace
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidId(
                "Record identifier cannot be empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// Build an identifier from a JSON identifier value
    ///
    /// Strings and integers are accepted; anything else is rejected.
    pub fn from_json(value: &JsonValue) -> Result<Self, DomainError> {
        match value {
            JsonValue::String(s) => Self::new(s.clone()),
            JsonValue::Number(n) if n.is_i64() || n.is_u64() => Self::new(n.to_string()),
            other => Err(DomainError::InvalidId(format!(
                "Unsupported identifier value: {other}"
            ))),
        }
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for RecordId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_record_id_rejects_empty() {
        assert!(RecordId::new("").is_err());
        assert!(RecordId::new("   ").is_err());
        assert_eq!(RecordId::new("lesson-1").unwrap().as_str(), "lesson-1");
    }

    #[test]
    fn test_numeric_and_string_ids_normalize() {
        let from_number = RecordId::from_json(&json!(7)).unwrap();
        let from_string = RecordId::from_json(&json!("7")).unwrap();
        assert_eq!(from_number, from_string);
    }

    #[test]
    fn test_unsupported_id_values() {
        assert!(RecordId::from_json(&json!(1.5)).is_err());
        assert!(RecordId::from_json(&json!(null)).is_err());
        assert!(RecordId::from_json(&json!({"a": 1})).is_err());
        assert!(RecordId::from_json(&json!(true)).is_err());
    }

    #[test]
    fn test_display_and_parse() {
        let id: RecordId = "theme".parse().unwrap();
        assert_eq!(id.to_string(), "theme");
    }
}
