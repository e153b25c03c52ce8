//! Business rules. Services take the locked store plus an explicit
//! caller value; nothing here reads ambient request state.

pub mod auth;
pub mod comments;
pub mod logs;
pub mod notifications;
pub mod subtasks;
pub mod tasks;
pub mod users;

use crewboard_api::{ApiError, TaskView, UserRef};
use crewboard_model::{Task, UserId};
use crewboard_store::{Store, StoreError};
use uuid::Uuid;

pub(crate) fn store_err(err: StoreError) -> ApiError {
    match err {
        StoreError::Duplicate("email") => ApiError::duplicate_email(),
        other => ApiError::internal(format!("store failure: {other}")),
    }
}

/// Mints a fresh uuid-backed id through the given parser.
pub(crate) fn fresh_id<T>(
    parse: fn(&str) -> Result<T, crewboard_model::ParseIdError>,
) -> Result<T, ApiError> {
    let raw = Uuid::new_v4().simple().to_string();
    parse(&raw).map_err(|e| ApiError::internal(format!("id generation failed: {e}")))
}

/// Resolves a user reference for display. Users are never hard-deleted,
/// so a dangling reference is unexpected but rendered rather than fatal.
pub(crate) fn user_ref(store: &Store, id: &UserId) -> Result<UserRef, ApiError> {
    let found = store.find_user_by_id(id).map_err(store_err)?;
    Ok(match found {
        Some(user) => UserRef::from(&user),
        None => UserRef {
            id: id.as_str().to_string(),
            username: "Unknown".to_string(),
            email: String::new(),
        },
    })
}

pub(crate) fn task_view(store: &Store, task: Task) -> Result<TaskView, ApiError> {
    let mut assignees = Vec::with_capacity(task.assignees.len());
    for id in &task.assignees {
        assignees.push(user_ref(store, id)?);
    }
    let created_by = user_ref(store, &task.created_by)?;
    Ok(TaskView::new(task, assignees, created_by))
}
