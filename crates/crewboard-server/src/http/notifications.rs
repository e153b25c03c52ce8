use crate::http::{parse_path_id, resolve_caller, ApiResult};
use crate::services::notifications;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use crewboard_api::NotificationView;
use crewboard_model::NotificationId;

pub async fn list_notifications_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Vec<NotificationView>> {
    let caller = resolve_caller(&state, &headers).await?;
    Ok(Json(notifications::list(&state, &caller).await?))
}

pub async fn mark_read_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<NotificationView> {
    let caller = resolve_caller(&state, &headers).await?;
    let id = parse_path_id(&id, NotificationId::parse, "Notification not found")?;
    Ok(Json(notifications::mark_read(&state, &caller, &id).await?))
}
