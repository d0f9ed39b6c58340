//! Clipboard history service

use crate::error::{ClipError, Result};
use crate::services::AuthService;
use crate::storage::Database;
use chrono::{SecondsFormat, Utc};
use clipsync_types::{ClipboardEntry, StorageSize};
use std::sync::Arc;
use tracing::{debug, info};

pub struct ClipboardService {
    db: Arc<Database>,
    auth: Arc<AuthService>,
}

impl ClipboardService {
    pub fn new(db: Arc<Database>, auth: Arc<AuthService>) -> Self {
        Self { db, auth }
    }

    /// Append an entry for a registered user, stamped with the current time.
    pub async fn append(&self, username: &str, content: &str) -> Result<ClipboardEntry> {
        if username.is_empty() || !self.auth.user_exists(username).await? {
            return Err(ClipError::InvalidUser);
        }
        if content.is_empty() {
            return Err(ClipError::MissingField("Missing clipboard data"));
        }

        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        self.db.insert_entry(username, content, &timestamp).await?;

        debug!("Stored {} bytes for {} at {}", content.len(), username, timestamp);

        Ok(ClipboardEntry {
            content: Some(content.to_string()),
            timestamp,
        })
    }

    pub async fn list_all(&self, username: &str) -> Result<Vec<ClipboardEntry>> {
        self.db.list_entries(username).await
    }

    pub async fn delete_all(&self, username: &str) -> Result<()> {
        let removed = self.db.delete_entries(username).await?;
        info!("Cleared {} entries for {}", removed, username);
        Ok(())
    }

    pub async fn delete_one(&self, username: &str, timestamp: &str) -> Result<()> {
        let removed = self.db.delete_entry(username, timestamp).await?;
        info!("Deleted {} entries for {} at {}", removed, username, timestamp);
        Ok(())
    }

    pub async fn total_size(&self) -> Result<StorageSize> {
        let bytes = self.db.total_quoted_size().await?;
        Ok(StorageSize::from_bytes(bytes))
    }
}
