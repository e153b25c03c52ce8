use crate::http::{parse_path_id, require_body, resolve_caller, ApiResult, ErrorResponse};
use crate::services::tasks;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use crewboard_api::{parse_task_list_params, MessageResponse, TaskPage, TaskView};
use crewboard_model::{NewTask, TaskId, TaskPatch};
use std::collections::HashMap;

pub async fn list_tasks_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<TaskPage> {
    resolve_caller(&state, &headers).await?;
    let query = parse_task_list_params(&params)?;
    Ok(Json(tasks::list(&state, query).await?))
}

pub async fn create_task_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<NewTask>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskView>), ErrorResponse> {
    let caller = resolve_caller(&state, &headers).await?;
    let payload = require_body(body)?;
    let view = tasks::create(&state, &caller, payload).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// Streams the live tasks as a CSV attachment.
pub async fn export_tasks_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ErrorResponse> {
    resolve_caller(&state, &headers).await?;
    let csv = tasks::export_csv(&state).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"tasks.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}

pub async fn get_task_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<TaskView> {
    resolve_caller(&state, &headers).await?;
    let id = parse_path_id(&id, TaskId::parse, "Task not found")?;
    Ok(Json(tasks::get(&state, &id).await?))
}

pub async fn update_task_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Result<Json<TaskPatch>, JsonRejection>,
) -> ApiResult<TaskView> {
    let caller = resolve_caller(&state, &headers).await?;
    let id = parse_path_id(&id, TaskId::parse, "Task not found")?;
    let patch = require_body(body)?;
    Ok(Json(tasks::update(&state, &caller, &id, patch).await?))
}

pub async fn delete_task_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<MessageResponse> {
    let caller = resolve_caller(&state, &headers).await?;
    let id = parse_path_id(&id, TaskId::parse, "Task not found")?;
    Ok(Json(tasks::delete(&state, &caller, &id).await?))
}
