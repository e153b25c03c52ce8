use crate::services::{fresh_id, logs, store_err, user_ref};
use crate::AppState;
use chrono::Utc;
use crewboard_api::{ApiError, MessageResponse, SubtaskView};
use crewboard_model::{
    normalize_title, LogAction, NewSubtask, Subtask, SubtaskId, SubtaskPatch, TaskId, User,
};
use crewboard_store::Store;

pub async fn create(
    state: &AppState,
    caller: &User,
    task_id: &TaskId,
    payload: NewSubtask,
) -> Result<SubtaskView, ApiError> {
    let title = normalize_title(&payload.title)?;
    let store = state.store.lock().await;
    // A subtask needs a live parent; a tombstoned task accepts no
    // further children.
    let parent = store
        .fetch_task(task_id)
        .map_err(store_err)?
        .ok_or_else(|| ApiError::not_found("Task not found"))?;

    let now = Utc::now();
    let subtask = Subtask {
        id: fresh_id(SubtaskId::parse)?,
        task: parent.id.clone(),
        title,
        status: payload.status.unwrap_or_default(),
        assignee: payload.assignee,
        is_deleted: false,
        created_at: now,
        updated_at: now,
    };
    store.insert_subtask(&subtask).map_err(store_err)?;
    logs::append(
        &store,
        &parent.id,
        &caller.id,
        LogAction::CreatedSubtask,
        format!("Subtask \"{}\" created.", subtask.title),
    );
    view(&store, subtask)
}

pub async fn list(state: &AppState, task_id: &TaskId) -> Result<Vec<SubtaskView>, ApiError> {
    let store = state.store.lock().await;
    if store.fetch_task(task_id).map_err(store_err)?.is_none() {
        return Err(ApiError::not_found("Task not found"));
    }
    let subtasks = store.list_subtasks(task_id).map_err(store_err)?;
    let mut views = Vec::with_capacity(subtasks.len());
    for subtask in subtasks {
        views.push(view(&store, subtask)?);
    }
    Ok(views)
}

pub async fn get(state: &AppState, id: &SubtaskId) -> Result<SubtaskView, ApiError> {
    let store = state.store.lock().await;
    let subtask = fetch_live(&store, id)?;
    view(&store, subtask)
}

pub async fn update(
    state: &AppState,
    caller: &User,
    id: &SubtaskId,
    patch: SubtaskPatch,
) -> Result<SubtaskView, ApiError> {
    let store = state.store.lock().await;
    let mut subtask = fetch_live(&store, id)?;

    if let Some(title) = patch.title {
        subtask.title = normalize_title(&title)?;
    }
    if let Some(status) = patch.status {
        subtask.status = status;
    }
    if let Some(assignee) = patch.assignee {
        subtask.assignee = assignee;
    }
    subtask.updated_at = Utc::now();
    store.update_subtask(&subtask).map_err(store_err)?;
    logs::append(
        &store,
        &subtask.task,
        &caller.id,
        LogAction::UpdatedSubtask,
        "Subtask updated.".to_string(),
    );
    view(&store, subtask)
}

pub async fn delete(
    state: &AppState,
    caller: &User,
    id: &SubtaskId,
) -> Result<MessageResponse, ApiError> {
    let store = state.store.lock().await;
    let mut subtask = fetch_live(&store, id)?;

    subtask.is_deleted = true;
    subtask.updated_at = Utc::now();
    store.update_subtask(&subtask).map_err(store_err)?;
    logs::append(
        &store,
        &subtask.task,
        &caller.id,
        LogAction::DeletedSubtask,
        "Subtask soft deleted.".to_string(),
    );
    Ok(MessageResponse::new("Subtask removed (soft delete)"))
}

fn fetch_live(store: &Store, id: &SubtaskId) -> Result<Subtask, ApiError> {
    store
        .fetch_subtask(id)
        .map_err(store_err)?
        .ok_or_else(|| ApiError::not_found("Subtask not found"))
}

fn view(store: &Store, subtask: Subtask) -> Result<SubtaskView, ApiError> {
    let assignee = match &subtask.assignee {
        Some(id) => Some(user_ref(store, id)?),
        None => None,
    };
    Ok(SubtaskView::new(subtask, assignee))
}
