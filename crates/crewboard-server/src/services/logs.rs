use crate::services::{fresh_id, store_err, user_ref};
use chrono::Utc;
use crewboard_api::{ApiError, LogView};
use crewboard_model::{LogAction, LogEntry, LogId, TaskId, UserId};
use crewboard_store::Store;
use tracing::warn;

/// Best-effort append. Activity logging is diagnostic, not
/// transactional: a failed write is reported to the operational log and
/// swallowed so it can never fail the business operation it describes.
pub fn append(store: &Store, task: &TaskId, user: &UserId, action: LogAction, details: String) {
    let entry = match fresh_id(LogId::parse) {
        Ok(id) => LogEntry {
            id,
            task: task.clone(),
            user: user.clone(),
            action,
            details,
            created_at: Utc::now(),
        },
        Err(err) => {
            warn!(task = %task, action = action.as_str(), "activity log id failed: {err}");
            return;
        }
    };
    if let Err(err) = store.insert_log(&entry) {
        warn!(task = %task, action = action.as_str(), "activity log write failed: {err}");
    }
}

/// Entries newest-first, acting users resolved for display.
pub fn list(store: &Store, task: &TaskId) -> Result<Vec<LogView>, ApiError> {
    let entries = store.list_logs(task).map_err(store_err)?;
    let mut views = Vec::with_capacity(entries.len());
    for entry in entries {
        let user = user_ref(store, &entry.user)?;
        views.push(LogView::new(entry, user));
    }
    Ok(views)
}
