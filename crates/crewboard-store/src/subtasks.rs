use crate::{Store, StoreError};
use crewboard_model::{Subtask, SubtaskId, TaskId};
use rusqlite::{params, OptionalExtension};

impl Store {
    pub fn insert_subtask(&self, subtask: &Subtask) -> Result<(), StoreError> {
        let doc = serde_json::to_string(subtask)?;
        self.conn().execute(
            "INSERT INTO subtasks (id, task_id, is_deleted, created_at_ms, doc)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                subtask.id.as_str(),
                subtask.task.as_str(),
                subtask.is_deleted as i64,
                subtask.created_at.timestamp_millis(),
                doc
            ],
        )?;
        Ok(())
    }

    pub fn update_subtask(&self, subtask: &Subtask) -> Result<(), StoreError> {
        let doc = serde_json::to_string(subtask)?;
        let changed = self.conn().execute(
            "UPDATE subtasks SET is_deleted = ?2, doc = ?3 WHERE id = ?1",
            params![subtask.id.as_str(), subtask.is_deleted as i64, doc],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownId);
        }
        Ok(())
    }

    /// Fetches a live subtask; tombstoned records are invisible.
    pub fn fetch_subtask(&self, id: &SubtaskId) -> Result<Option<Subtask>, StoreError> {
        let doc: Option<String> = self
            .conn()
            .query_row(
                "SELECT doc FROM subtasks WHERE id = ?1 AND is_deleted = 0",
                params![id.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        match doc {
            Some(doc) => Ok(Some(serde_json::from_str(&doc)?)),
            None => Ok(None),
        }
    }

    /// Live subtasks of a task, oldest-first.
    pub fn list_subtasks(&self, task: &TaskId) -> Result<Vec<Subtask>, StoreError> {
        let mut stmt = self.conn().prepare(
            "SELECT doc FROM subtasks WHERE task_id = ?1 AND is_deleted = 0
             ORDER BY created_at_ms ASC, rowid ASC",
        )?;
        let rows = stmt.query_map(params![task.as_str()], |row| row.get::<_, String>(0))?;
        let mut subtasks = Vec::new();
        for doc in rows {
            subtasks.push(serde_json::from_str(&doc?)?);
        }
        Ok(subtasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use crewboard_model::Status;

    fn subtask(id: &str, task: &str, title: &str) -> Subtask {
        Subtask {
            id: SubtaskId::parse(id).unwrap(),
            task: TaskId::parse(task).unwrap(),
            title: title.to_string(),
            status: Status::Todo,
            assignee: None,
            is_deleted: false,
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn list_scopes_to_parent_and_excludes_deleted() {
        let store = Store::open_in_memory().unwrap();
        store.insert_subtask(&subtask("s1", "t1", "first")).unwrap();
        store.insert_subtask(&subtask("s2", "t1", "second")).unwrap();
        store.insert_subtask(&subtask("s3", "t2", "other task")).unwrap();

        let mut gone = subtask("s4", "t1", "deleted");
        store.insert_subtask(&gone).unwrap();
        gone.is_deleted = true;
        store.update_subtask(&gone).unwrap();

        let titles: Vec<String> = store
            .list_subtasks(&TaskId::parse("t1").unwrap())
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["first", "second"]);
        assert!(store.fetch_subtask(&gone.id).unwrap().is_none());
    }
}
