use crate::http::{parse_path_id, require_body, resolve_caller, ApiResult, ErrorResponse};
use crate::services::{comments, logs, store_err};
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use crewboard_api::{ApiError, CommentView, LogView};
use crewboard_model::{NewComment, TaskId};

pub async fn list_comments_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(task_id): Path<String>,
) -> ApiResult<Vec<CommentView>> {
    resolve_caller(&state, &headers).await?;
    let task_id = parse_path_id(&task_id, TaskId::parse, "Task not found")?;
    Ok(Json(comments::list(&state, &task_id).await?))
}

pub async fn add_comment_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(task_id): Path<String>,
    body: Result<Json<NewComment>, JsonRejection>,
) -> Result<(StatusCode, Json<CommentView>), ErrorResponse> {
    let caller = resolve_caller(&state, &headers).await?;
    let task_id = parse_path_id(&task_id, TaskId::parse, "Task not found")?;
    let payload = require_body(body)?;
    let view = comments::add(&state, &caller, &task_id, payload).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// The activity stream outlives its task, so no liveness check here:
/// history of a soft-deleted task stays readable.
pub async fn list_logs_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(task_id): Path<String>,
) -> ApiResult<Vec<LogView>> {
    resolve_caller(&state, &headers).await?;
    let task_id = parse_path_id(&task_id, TaskId::parse, "Task not found")?;
    let store = state.store.lock().await;
    if store.fetch_task_any(&task_id).map_err(store_err)?.is_none() {
        return Err(ApiError::not_found("Task not found").into());
    }
    Ok(Json(logs::list(&store, &task_id)?))
}
