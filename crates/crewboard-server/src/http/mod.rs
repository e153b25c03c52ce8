//! Transport boundary: extractors in, [`ApiError`] out. Handlers stay
//! thin and delegate every decision to the service layer.

pub mod auth;
pub mod comments_logs;
pub mod misc;
pub mod notifications;
pub mod subtasks;
pub mod tasks;
pub mod users;

use crate::services::store_err;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use crewboard_api::{map_error, ApiError};
use crewboard_model::User;
use serde_json::json;

/// [`ApiError`] carried across the axum boundary. Renders as the mapped
/// status with a `{ "message": ... }` body; internal failures hide their
/// detail behind a generic message.
pub struct ErrorResponse(pub ApiError);

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(map_error(&self.0))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(code = ?self.0.code, "request failed: {}", self.0.message);
            "Internal server error".to_string()
        } else {
            self.0.message
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<Json<T>, ErrorResponse>;

/// Unwraps a JSON body extraction, turning decode rejections into a 400
/// instead of axum's default 422.
pub fn require_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ErrorResponse> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(ErrorResponse(ApiError::validation(format!(
            "invalid request body: {rejection}"
        )))),
    }
}

/// Resolves the caller from the `Authorization: Bearer` header. Token
/// verification and the user lookup both fail closed with the same
/// message.
pub async fn resolve_caller(state: &AppState, headers: &HeaderMap) -> Result<User, ApiError> {
    let raw = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::unauthorized("Not authorized, no token"))?;
    let user_id = state.tokens.verify(raw, Utc::now())?;
    let store = state.store.lock().await;
    store
        .find_user_by_id(&user_id)
        .map_err(store_err)?
        .ok_or_else(|| ApiError::unauthorized("Not authorized, token failed"))
}

/// Parses a path segment through an id parser, answering 404 for ids
/// that cannot name any record.
pub fn parse_path_id<T>(
    raw: &str,
    parse: fn(&str) -> Result<T, crewboard_model::ParseIdError>,
    missing: &str,
) -> Result<T, ApiError> {
    parse(raw).map_err(|_| ApiError::not_found(missing))
}
