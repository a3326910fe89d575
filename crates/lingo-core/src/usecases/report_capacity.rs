//! Capacity reporting use case

use std::sync::Arc;

use serde::Serialize;

use crate::domain::{format_bytes, StorageInfo};
use crate::ports::ILocalStore;

/// Storage snapshot with display strings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityReport {
    #[serde(flatten)]
    pub info: StorageInfo,
    pub used_display: String,
    pub quota_display: String,
}

/// Use case for reporting local storage consumption
pub struct ReportCapacityUseCase {
    store: Arc<dyn ILocalStore>,
}

impl ReportCapacityUseCase {
    pub fn new(store: Arc<dyn ILocalStore>) -> Self {
        Self { store }
    }

    /// Current figures, recomputed on every call
    pub async fn capacity(&self) -> StorageInfo {
        self.store.capacity().await
    }

    /// Current figures plus human-readable sizes
    pub async fn report(&self) -> CapacityReport {
        let info = self.capacity().await;
        CapacityReport {
            used_display: format_bytes(info.used),
            quota_display: format_bytes(info.quota),
            info,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{Partition, QuotaEstimate};
    use crate::usecases::testing::{record, MemoryStore};

    #[tokio::test]
    async fn test_unavailable_quota_reports_zeros() {
        let store = Arc::new(MemoryStore::default());
        let uc = ReportCapacityUseCase::new(store);

        let report = uc.report().await;

        assert_eq!(report.info, StorageInfo::unavailable());
        assert_eq!(report.info.used_percentage, 0.0);
        assert_eq!(report.used_display, "0 Bytes");
        assert_eq!(report.quota_display, "0 Bytes");
    }

    #[tokio::test]
    async fn test_report_formats_live_figures() {
        let store = Arc::new(MemoryStore::default());
        store.set_quota(QuotaEstimate {
            used: 512 * 1024,
            quota: 2 * 1024 * 1024,
        });
        let uc = ReportCapacityUseCase::new(store.clone());

        let report = uc.report().await;
        assert_eq!(report.info.used_percentage, 25.0);
        assert_eq!(report.used_display, "512 KB");
        assert_eq!(report.quota_display, "2 MB");

        store.seed(Partition::Lessons, vec![record(json!({"id": "l1"}))]);
        store.set_quota(QuotaEstimate {
            used: 1024 * 1024,
            quota: 2 * 1024 * 1024,
        });
        assert_eq!(uc.capacity().await.used_percentage, 50.0);
    }

    #[test]
    fn test_report_serializes_flat() {
        let report = CapacityReport {
            info: StorageInfo::new(1536, 3072),
            used_display: "1.5 KB".to_string(),
            quota_display: "3 KB".to_string(),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["usedPercentage"], json!(50.0));
        assert_eq!(value["usedDisplay"], json!("1.5 KB"));
    }
}
