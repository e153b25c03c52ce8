use crate::http::{require_body, ApiResult, ErrorResponse};
use crate::services::auth;
use crate::services::auth::{
    ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
};
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use crewboard_api::{AuthResponse, MessageResponse};

pub async fn register_handler(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), ErrorResponse> {
    let payload = require_body(body)?;
    let response = auth::register(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login_handler(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<AuthResponse> {
    let payload = require_body(body)?;
    Ok(Json(auth::login(&state, payload).await?))
}

pub async fn verify_email_handler(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> ApiResult<MessageResponse> {
    Ok(Json(auth::verify_email(&state, &token).await?))
}

pub async fn forgot_password_handler(
    State(state): State<AppState>,
    body: Result<Json<ForgotPasswordRequest>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let payload = require_body(body)?;
    Ok(Json(auth::forgot_password(&state, payload).await?))
}

pub async fn reset_password_handler(
    State(state): State<AppState>,
    Path(token): Path<String>,
    body: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), ErrorResponse> {
    let payload = require_body(body)?;
    let response = auth::reset_password(&state, &token, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
