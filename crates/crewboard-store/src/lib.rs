#![forbid(unsafe_code)]
//! JSON document persistence for crewboard.
//!
//! Each entity lives in its own table as a serialized JSON document plus
//! the handful of columns the repositories filter and sort on. Soft
//! deletion is an explicit `is_deleted = 0` predicate written into every
//! task/subtask read path rather than an implicit query hook, so the
//! exclusion is visible and independently testable.

mod activity;
mod notifications;
mod subtasks;
mod tasks;
mod users;

pub use tasks::TaskFilter;

use rusqlite::Connection;
use std::path::Path;

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Sql(rusqlite::Error),
    Corrupt(serde_json::Error),
    Duplicate(&'static str),
    UnknownId,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io: {err}"),
            Self::Sql(err) => write!(f, "sqlite: {err}"),
            Self::Corrupt(err) => write!(f, "corrupt document: {err}"),
            Self::Duplicate(field) => write!(f, "duplicate {field}"),
            Self::UnknownId => write!(f, "unknown id"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sql(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Corrupt(value)
    }
}

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        if let Some(parent) = db_path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(db_path)?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;

            CREATE TABLE IF NOT EXISTS users (
              id TEXT PRIMARY KEY,
              username TEXT NOT NULL,
              email TEXT NOT NULL UNIQUE,
              verification_token TEXT,
              reset_token_hash TEXT,
              doc TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS tasks (
              id TEXT PRIMARY KEY,
              is_deleted INTEGER NOT NULL DEFAULT 0,
              created_at_ms INTEGER NOT NULL,
              doc TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS subtasks (
              id TEXT PRIMARY KEY,
              task_id TEXT NOT NULL,
              is_deleted INTEGER NOT NULL DEFAULT 0,
              created_at_ms INTEGER NOT NULL,
              doc TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS comments (
              id TEXT PRIMARY KEY,
              task_id TEXT NOT NULL,
              created_at_ms INTEGER NOT NULL,
              doc TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS logs (
              id TEXT PRIMARY KEY,
              task_id TEXT NOT NULL,
              created_at_ms INTEGER NOT NULL,
              doc TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS notifications (
              id TEXT PRIMARY KEY,
              recipient TEXT NOT NULL,
              created_at_ms INTEGER NOT NULL,
              doc TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_tasks_deleted ON tasks(is_deleted, created_at_ms);
            CREATE INDEX IF NOT EXISTS idx_subtasks_task ON subtasks(task_id, is_deleted);
            CREATE INDEX IF NOT EXISTS idx_comments_task ON comments(task_id, created_at_ms);
            CREATE INDEX IF NOT EXISTS idx_logs_task ON logs(task_id, created_at_ms);
            CREATE INDEX IF NOT EXISTS idx_notifications_recipient
              ON notifications(recipient, created_at_ms);
            "#,
        )?;
        Ok(())
    }
}

pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_on_disk_creates_parent_dirs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested/data/crewboard.db");
        let store = Store::open(&path).expect("open store");
        drop(store);
        assert!(path.exists());
        // Reopen runs migrations idempotently.
        Store::open(&path).expect("reopen store");
    }
}
