//! Storage consumption snapshots

use serde::{Deserialize, Serialize};

/// Raw usage figures reported by a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaEstimate {
    /// Bytes currently used
    pub used: u64,
    /// Bytes available in total
    pub quota: u64,
}

/// Transient snapshot of storage consumption
///
/// Always computed from live figures; never persisted or cached.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageInfo {
    pub used: u64,
    pub quota: u64,
    pub used_percentage: f64,
}

impl StorageInfo {
    /// Builds a snapshot, deriving the percentage (0 when quota is 0)
    pub fn new(used: u64, quota: u64) -> Self {
        let used_percentage = if quota == 0 {
            0.0
        } else {
            used as f64 / quota as f64 * 100.0
        };
        Self {
            used,
            quota,
            used_percentage,
        }
    }

    /// Snapshot returned when the backend cannot report quota
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Returns true if this snapshot carries no figures
    pub fn is_unavailable(&self) -> bool {
        self.quota == 0 && self.used == 0
    }
}

impl From<QuotaEstimate> for StorageInfo {
    fn from(estimate: QuotaEstimate) -> Self {
        Self::new(estimate.used, estimate.quota)
    }
}

const BYTE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Formats a byte count with 1024-based units, for display only
///
/// Two decimals at most, trailing zeros dropped: `0 Bytes`, `1.5 KB`, `2 GB`.
/// Values beyond the gigabyte range stay expressed in GB.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, BYTE_UNITS[unit])
}
