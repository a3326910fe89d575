//! Ephemeral grouping of records pushed by the synchronizer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::Record;

/// Locally accumulated records pushed together to the remote source
///
/// Built only at synchronization time and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncBatch {
    pub progress: Vec<Record>,
    pub activities: Vec<Record>,
    pub vocabulary: Vec<Record>,
    pub timestamp: DateTime<Utc>,
}

impl SyncBatch {
    /// Creates a batch stamped with the current time
    pub fn new(progress: Vec<Record>, activities: Vec<Record>, vocabulary: Vec<Record>) -> Self {
        Self {
            progress,
            activities,
            vocabulary,
            timestamp: Utc::now(),
        }
    }

    /// Total number of records across all groups
    pub fn len(&self) -> usize {
        self.progress.len() + self.activities.len() + self.vocabulary.len()
    }

    /// Returns true if the batch carries no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(value: serde_json::Value) -> Record {
        Record::from_value(value).unwrap()
    }

    #[test]
    fn test_len_counts_all_groups() {
        let batch = SyncBatch::new(
            vec![record(json!({"id": "p1"}))],
            vec![record(json!({"id": "a1"})), record(json!({"id": "a2"}))],
            vec![],
        );
        assert_eq!(batch.len(), 3);
        assert!(!batch.is_empty());
        assert!(SyncBatch::new(vec![], vec![], vec![]).is_empty());
    }

    #[test]
    fn test_wire_shape() {
        let batch = SyncBatch::new(vec![record(json!({"id": "p1", "score": 80}))], vec![], vec![]);
        let value = serde_json::to_value(&batch).unwrap();
        assert_eq!(value["progress"][0]["score"], json!(80));
        assert!(value["activities"].as_array().unwrap().is_empty());
        assert!(value["timestamp"].is_string());
    }
}
