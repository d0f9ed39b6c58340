//! Credential document: a JSON object mapping username to password hash
//!
//! The whole document is read on every access and rewritten in full on every
//! registration. Writers are serialized through `write_lock` and replace the
//! file atomically via a temporary sibling and a rename.

use crate::error::Result;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

pub type Credentials = BTreeMap<String, String>;

pub struct UserFile {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl UserFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full document. A missing or blank file is an empty store.
    pub async fn load(&self) -> Result<Credentials> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Credential file {} not found, treating as empty", self.path.display());
                return Ok(Credentials::new());
            }
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Credentials::new());
        }

        Ok(serde_json::from_str(&raw)?)
    }

    pub async fn get_hash(&self, username: &str) -> Result<Option<String>> {
        Ok(self.load().await?.remove(username))
    }

    pub async fn contains(&self, username: &str) -> Result<bool> {
        Ok(self.load().await?.contains_key(username))
    }

    pub async fn count(&self) -> Result<usize> {
        Ok(self.load().await?.len())
    }

    /// Insert a new user and persist the document.
    ///
    /// Returns `false` without writing when the username is already taken.
    pub async fn insert_new(&self, username: &str, password_hash: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;

        let mut users = self.load().await?;
        if users.contains_key(username) {
            return Ok(false);
        }

        users.insert(username.to_string(), password_hash.to_string());
        self.save(&users).await?;

        info!("Stored credentials for {} ({} users)", username, users.len());
        Ok(true)
    }

    async fn save(&self, users: &Credentials) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "users.json".to_string());
        let tmp_path = self.path.with_file_name(format!("{}.tmp", file_name));

        let body = serde_json::to_string_pretty(users)?;
        tokio::fs::write(&tmp_path, body).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        Ok(())
    }
}
