//! Named partitions of the local store
//!
//! Each partition is an independent collection of records with its own
//! lifecycle. The storage names are stable: they are used as table names by
//! the SQLite adapter and as path segments by the remote API.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// A named, independently clearable collection within the local store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Partition {
    /// Lesson content (title, content, chapter, difficulty)
    #[serde(rename = "lessons")]
    Lessons,
    /// Vocabulary term pairs with a category
    #[serde(rename = "vocabulary")]
    Vocabulary,
    /// Activities with embedded questions
    #[serde(rename = "activities")]
    Activities,
    /// Learner progress (completion flag, score)
    #[serde(rename = "progress")]
    Progress,
    /// User settings, keyed by `key` instead of `id`
    #[serde(rename = "userSettings")]
    UserSettings,
}

impl Partition {
    /// Every partition, in schema order
    pub const ALL: [Partition; 5] = [
        Partition::Lessons,
        Partition::Vocabulary,
        Partition::Activities,
        Partition::Progress,
        Partition::UserSettings,
    ];

    /// Partitions pulled by the content downloader, in processing order
    pub const DOWNLOADABLE: [Partition; 4] = [
        Partition::Lessons,
        Partition::Vocabulary,
        Partition::Activities,
        Partition::Progress,
    ];

    /// Partitions read by the synchronizer
    pub const SYNCED: [Partition; 3] = [
        Partition::Progress,
        Partition::Activities,
        Partition::Vocabulary,
    ];

    /// Stable storage name of the partition
    pub const fn as_str(&self) -> &'static str {
        match self {
            Partition::Lessons => "lessons",
            Partition::Vocabulary => "vocabulary",
            Partition::Activities => "activities",
            Partition::Progress => "progress",
            Partition::UserSettings => "userSettings",
        }
    }

    /// Name of the field that uniquely identifies a record
    pub const fn key_field(&self) -> &'static str {
        match self {
            Partition::UserSettings => "key",
            _ => "id",
        }
    }
}

impl Display for Partition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Partition {
    type Err = DomainError;

    /// Accepts the storage name, plus `user_settings` / `user-settings` for
    /// command-line convenience
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lessons" => Ok(Partition::Lessons),
            "vocabulary" => Ok(Partition::Vocabulary),
            "activities" => Ok(Partition::Activities),
            "progress" => Ok(Partition::Progress),
            "userSettings" | "user_settings" | "user-settings" => Ok(Partition::UserSettings),
            other => Err(DomainError::InvalidPartition(other.to_string())),
        }
    }
}
