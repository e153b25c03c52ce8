use crate::{Store, StoreError};
use crewboard_model::{Priority, Status, Task, TaskId, UserId};
use rusqlite::{params, OptionalExtension};

/// Conjunction of list filters. An unset field matches everything; the
/// soft-delete exclusion is not part of the filter — read paths apply it
/// unconditionally.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub assignee: Option<UserId>,
    pub due_date: Option<chrono::NaiveDate>,
    pub tag: Option<String>,
    pub search: Option<String>,
}

impl TaskFilter {
    fn matches(&self, task: &Task) -> bool {
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        if let Some(assignee) = &self.assignee {
            if !task.is_assignee(assignee) {
                return false;
            }
        }
        if let Some(due) = self.due_date {
            // Exact-day window: inclusive start of day, exclusive next day.
            if task.due_date != Some(due) {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !task.tags.iter().any(|t| t == tag) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let in_title = task.title.to_lowercase().contains(&needle);
            let in_description = task
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !in_title && !in_description {
                return false;
            }
        }
        true
    }
}

impl Store {
    pub fn insert_task(&self, task: &Task) -> Result<(), StoreError> {
        let doc = serde_json::to_string(task)?;
        self.conn().execute(
            "INSERT INTO tasks (id, is_deleted, created_at_ms, doc) VALUES (?1, ?2, ?3, ?4)",
            params![
                task.id.as_str(),
                task.is_deleted as i64,
                task.created_at.timestamp_millis(),
                doc
            ],
        )?;
        Ok(())
    }

    pub fn update_task(&self, task: &Task) -> Result<(), StoreError> {
        let doc = serde_json::to_string(task)?;
        let changed = self.conn().execute(
            "UPDATE tasks SET is_deleted = ?2, doc = ?3 WHERE id = ?1",
            params![task.id.as_str(), task.is_deleted as i64, doc],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownId);
        }
        Ok(())
    }

    /// Fetches a live task; soft-deleted records are invisible here.
    pub fn fetch_task(&self, id: &TaskId) -> Result<Option<Task>, StoreError> {
        let doc: Option<String> = self
            .conn()
            .query_row(
                "SELECT doc FROM tasks WHERE id = ?1 AND is_deleted = 0",
                params![id.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        match doc {
            Some(doc) => Ok(Some(serde_json::from_str(&doc)?)),
            None => Ok(None),
        }
    }

    /// Tombstone-bypassing fetch. Only diagnostics and tests should need
    /// this; business reads go through [`Store::fetch_task`].
    pub fn fetch_task_any(&self, id: &TaskId) -> Result<Option<Task>, StoreError> {
        let doc: Option<String> = self
            .conn()
            .query_row(
                "SELECT doc FROM tasks WHERE id = ?1",
                params![id.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        match doc {
            Some(doc) => Ok(Some(serde_json::from_str(&doc)?)),
            None => Ok(None),
        }
    }

    /// All live tasks matching the filter, newest-first. Pagination is
    /// the caller's concern; the filter itself is a linear scan over the
    /// documents.
    pub fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, StoreError> {
        let mut stmt = self.conn().prepare(
            "SELECT doc FROM tasks WHERE is_deleted = 0
             ORDER BY created_at_ms DESC, rowid DESC",
        )?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut tasks = Vec::new();
        for doc in rows {
            let task: Task = serde_json::from_str(&doc?)?;
            if filter.matches(&task) {
                tasks.push(task);
            }
        }
        Ok(tasks)
    }
}
