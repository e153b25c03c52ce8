use crate::http::{parse_path_id, require_body, resolve_caller, ApiResult, ErrorResponse};
use crate::services::subtasks;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use crewboard_api::{MessageResponse, SubtaskView};
use crewboard_model::{NewSubtask, SubtaskId, SubtaskPatch, TaskId};

pub async fn list_subtasks_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(task_id): Path<String>,
) -> ApiResult<Vec<SubtaskView>> {
    resolve_caller(&state, &headers).await?;
    let task_id = parse_path_id(&task_id, TaskId::parse, "Task not found")?;
    Ok(Json(subtasks::list(&state, &task_id).await?))
}

pub async fn create_subtask_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(task_id): Path<String>,
    body: Result<Json<NewSubtask>, JsonRejection>,
) -> Result<(StatusCode, Json<SubtaskView>), ErrorResponse> {
    let caller = resolve_caller(&state, &headers).await?;
    let task_id = parse_path_id(&task_id, TaskId::parse, "Task not found")?;
    let payload = require_body(body)?;
    let view = subtasks::create(&state, &caller, &task_id, payload).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_subtask_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<SubtaskView> {
    resolve_caller(&state, &headers).await?;
    let id = parse_path_id(&id, SubtaskId::parse, "Subtask not found")?;
    Ok(Json(subtasks::get(&state, &id).await?))
}

pub async fn update_subtask_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Result<Json<SubtaskPatch>, JsonRejection>,
) -> ApiResult<SubtaskView> {
    let caller = resolve_caller(&state, &headers).await?;
    let id = parse_path_id(&id, SubtaskId::parse, "Subtask not found")?;
    let patch = require_body(body)?;
    Ok(Json(subtasks::update(&state, &caller, &id, patch).await?))
}

pub async fn delete_subtask_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<MessageResponse> {
    let caller = resolve_caller(&state, &headers).await?;
    let id = parse_path_id(&id, SubtaskId::parse, "Subtask not found")?;
    Ok(Json(subtasks::delete(&state, &caller, &id).await?))
}
