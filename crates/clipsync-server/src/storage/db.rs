//! SQLite entry table (embedded, no external dependencies)

use crate::error::Result;
use crate::storage::quote::quoted_len;
use anyhow::Context;
use clipsync_types::ClipboardEntry;
use futures::TryStreamExt;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::sync::Arc;

pub struct Database {
    pool: Arc<SqlitePool>,
}

impl Database {
    pub async fn new(database_path: &Path) -> anyhow::Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path.display());

        // Create parent directory if needed
        if let Some(parent) = database_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| {
                format!(
                    "Failed to connect to SQLite database at: {}",
                    database_path.display()
                )
            })?;

        Self::ensure_schema(&pool)
            .await
            .context("Failed to create entries table")?;

        tracing::info!("Database initialization complete");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Create the entries table on a fresh database. Existing tables are left
    /// untouched.
    async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS entries (
                username TEXT NOT NULL,
                content TEXT NOT NULL,
                timestamp TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_entries_username ON entries (username)
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn insert_entry(&self, username: &str, content: &str, timestamp: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO entries (username, content, timestamp)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(username)
        .bind(content)
        .bind(timestamp)
        .execute(&*self.pool)
        .await?;

        Ok(())
    }

    /// All entries of a user in insertion order
    pub async fn list_entries(&self, username: &str) -> Result<Vec<ClipboardEntry>> {
        let rows: Vec<(Option<String>, String)> = sqlx::query_as(
            r#"
            SELECT content, timestamp FROM entries
            WHERE username = ?1
            ORDER BY rowid
            "#,
        )
        .bind(username)
        .fetch_all(&*self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(content, timestamp)| ClipboardEntry { content, timestamp })
            .collect())
    }

    pub async fn delete_entries(&self, username: &str) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM entries WHERE username = ?1
            "#,
        )
        .bind(username)
        .execute(&*self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete every entry matching both fields; identical timestamps are
    /// removed together.
    pub async fn delete_entry(&self, username: &str, timestamp: &str) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM entries WHERE username = ?1 AND timestamp = ?2
            "#,
        )
        .bind(username)
        .bind(timestamp)
        .execute(&*self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Sum of the quoted-literal size of every stored content value
    pub async fn total_quoted_size(&self) -> Result<u64> {
        let mut rows = sqlx::query_scalar::<_, Option<String>>(
            r#"
            SELECT content FROM entries
            "#,
        )
        .fetch(&*self.pool);

        let mut total = 0u64;
        while let Some(content) = rows.try_next().await? {
            total += quoted_len(&content)?;
        }

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn open(dir: &tempfile::TempDir) -> Database {
        Database::new(&dir.path().join("clipboard.db")).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_list_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let db = open(&dir).await;

        db.insert_entry("alice", "first", "2026-01-01T00:00:02.000000Z")
            .await
            .unwrap();
        db.insert_entry("alice", "second", "2026-01-01T00:00:01.000000Z")
            .await
            .unwrap();
        db.insert_entry("bob", "other", "2026-01-01T00:00:03.000000Z")
            .await
            .unwrap();

        let entries = db.list_entries("alice").await.unwrap();
        let contents: Vec<_> = entries.iter().filter_map(|e| e.content.as_deref()).collect();
        assert_eq!(contents, vec!["first", "second"]);

        assert!(db.list_entries("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_entry_matches_both_fields() {
        let dir = tempfile::tempdir().unwrap();
        let db = open(&dir).await;

        db.insert_entry("alice", "a", "T1").await.unwrap();
        db.insert_entry("alice", "b", "T1").await.unwrap();
        db.insert_entry("alice", "c", "T2").await.unwrap();
        db.insert_entry("bob", "d", "T1").await.unwrap();

        assert_eq!(db.delete_entry("alice", "T1").await.unwrap(), 2);
        assert_eq!(db.delete_entry("alice", "T9").await.unwrap(), 0);

        assert_eq!(db.list_entries("alice").await.unwrap().len(), 1);
        assert_eq!(db.list_entries("bob").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_entries() {
        let dir = tempfile::tempdir().unwrap();
        let db = open(&dir).await;

        db.insert_entry("alice", "a", "T1").await.unwrap();
        db.insert_entry("alice", "b", "T2").await.unwrap();

        assert_eq!(db.delete_entries("alice").await.unwrap(), 2);
        assert_eq!(db.delete_entries("alice").await.unwrap(), 0);
        assert!(db.list_entries("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_total_quoted_size_spans_users() {
        let dir = tempfile::tempdir().unwrap();
        let db = open(&dir).await;

        assert_eq!(db.total_quoted_size().await.unwrap(), 0);

        db.insert_entry("alice", "hi", "T1").await.unwrap();
        assert_eq!(db.total_quoted_size().await.unwrap(), 4);

        db.insert_entry("bob", "é", "T2").await.unwrap();
        assert_eq!(db.total_quoted_size().await.unwrap(), 12);
    }

    #[tokio::test]
    async fn test_null_content_rows_from_external_writers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clipboard.db");

        // Table created by another tool without the NOT NULL constraint
        {
            let pool = SqlitePoolOptions::new()
                .connect_with(
                    SqliteConnectOptions::new()
                        .filename(&path)
                        .create_if_missing(true),
                )
                .await
                .unwrap();
            sqlx::query("CREATE TABLE entries (username TEXT, content TEXT, timestamp TEXT)")
                .execute(&pool)
                .await
                .unwrap();
            sqlx::query("INSERT INTO entries VALUES ('alice', NULL, 'T1')")
                .execute(&pool)
                .await
                .unwrap();
            pool.close().await;
        }

        let db = Database::new(&path).await.unwrap();
        db.insert_entry("alice", "hi", "T2").await.unwrap();

        let entries = db.list_entries("alice").await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].content, None);
        assert_eq!(entries[1].content.as_deref(), Some("hi"));

        // NULL is measured as `null`
        assert_eq!(db.total_quoted_size().await.unwrap(), 4 + 4);
    }

    #[tokio::test]
    async fn test_reopen_keeps_entries() {
        let dir = tempfile::tempdir().unwrap();
        {
            let db = open(&dir).await;
            db.insert_entry("alice", "kept", "T1").await.unwrap();
        }

        let db = open(&dir).await;
        assert_eq!(
            db.list_entries("alice").await.unwrap()[0].content.as_deref(),
            Some("kept")
        );
    }
}
