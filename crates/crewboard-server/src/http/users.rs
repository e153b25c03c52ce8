use crate::http::{resolve_caller, ApiResult};
use crate::services::users;
use crate::AppState;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use crewboard_api::UserProfile;

pub async fn list_users_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Vec<UserProfile>> {
    resolve_caller(&state, &headers).await?;
    Ok(Json(users::list(&state).await?))
}
