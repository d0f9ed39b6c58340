//! Clipboard entry types

use serde::{Deserialize, Serialize};

use crate::non_empty;

/// One stored clipboard submission, as returned to the owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardEntry {
    /// `None` only for NULL rows written into the table by other tools
    pub content: Option<String>,
    /// Server-assigned RFC 3339 timestamp; together with the username it
    /// identifies the entry for deletion
    pub timestamp: String,
}

/// Upload request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadRequest {
    #[serde(default, deserialize_with = "crate::lenient_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient_string")]
    pub data: Option<String>,
}

impl UploadRequest {
    pub fn username(&self) -> Option<&str> {
        non_empty(&self.username)
    }

    pub fn data(&self) -> Option<&str> {
        non_empty(&self.data)
    }
}

/// Single entry deletion request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteEntryRequest {
    #[serde(default, deserialize_with = "crate::lenient_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient_string")]
    pub timestamp: Option<String>,
}

impl DeleteEntryRequest {
    pub fn key(&self) -> Option<(&str, &str)> {
        Some((non_empty(&self.username)?, non_empty(&self.timestamp)?))
    }
}

/// `?user_id=` query used by the history and clear routes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserQuery {
    #[serde(default, deserialize_with = "crate::lenient_string")]
    pub user_id: Option<String>,
}

impl UserQuery {
    /// Build from raw query pairs; a repeated `user_id` keeps its first value.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            user_id: pairs
                .into_iter()
                .find(|(key, _)| key == "user_id")
                .map(|(_, value)| value),
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        non_empty(&self.user_id)
    }
}

/// Total storage used by every entry of every user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StorageSize {
    pub total_size_bytes: u64,
    pub total_size_kb: f64,
    pub total_size_mb: f64,
}

impl StorageSize {
    /// Build the report from a byte count, rounding KB and MB to 2 decimals
    /// (half away from zero).
    pub fn from_bytes(bytes: u64) -> Self {
        Self {
            total_size_bytes: bytes,
            total_size_kb: round2(bytes as f64 / 1024.0),
            total_size_mb: round2(bytes as f64 / (1024.0 * 1024.0)),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
