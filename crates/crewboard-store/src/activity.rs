use crate::{Store, StoreError};
use crewboard_model::{Comment, LogEntry, TaskId};
use rusqlite::params;

impl Store {
    pub fn insert_comment(&self, comment: &Comment) -> Result<(), StoreError> {
        let doc = serde_json::to_string(comment)?;
        self.conn().execute(
            "INSERT INTO comments (id, task_id, created_at_ms, doc) VALUES (?1, ?2, ?3, ?4)",
            params![
                comment.id.as_str(),
                comment.task.as_str(),
                comment.created_at.timestamp_millis(),
                doc
            ],
        )?;
        Ok(())
    }

    /// Comments of a task, oldest-first.
    pub fn list_comments(&self, task: &TaskId) -> Result<Vec<Comment>, StoreError> {
        let mut stmt = self.conn().prepare(
            "SELECT doc FROM comments WHERE task_id = ?1
             ORDER BY created_at_ms ASC, rowid ASC",
        )?;
        let rows = stmt.query_map(params![task.as_str()], |row| row.get::<_, String>(0))?;
        let mut comments = Vec::new();
        for doc in rows {
            comments.push(serde_json::from_str(&doc?)?);
        }
        Ok(comments)
    }

    pub fn insert_log(&self, entry: &LogEntry) -> Result<(), StoreError> {
        let doc = serde_json::to_string(entry)?;
        self.conn().execute(
            "INSERT INTO logs (id, task_id, created_at_ms, doc) VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.id.as_str(),
                entry.task.as_str(),
                entry.created_at.timestamp_millis(),
                doc
            ],
        )?;
        Ok(())
    }

    /// Activity entries of a task, newest-first. Entries survive the
    /// parent task's soft-delete.
    pub fn list_logs(&self, task: &TaskId) -> Result<Vec<LogEntry>, StoreError> {
        let mut stmt = self.conn().prepare(
            "SELECT doc FROM logs WHERE task_id = ?1
             ORDER BY created_at_ms DESC, rowid DESC",
        )?;
        let rows = stmt.query_map(params![task.as_str()], |row| row.get::<_, String>(0))?;
        let mut entries = Vec::new();
        for doc in rows {
            entries.push(serde_json::from_str(&doc?)?);
        }
        Ok(entries)
    }
}
