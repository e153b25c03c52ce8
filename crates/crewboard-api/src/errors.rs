use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Closed failure taxonomy. Services raise these; the boundary maps each
/// code to a status via [`crate::map_error`] and renders the body as
/// `{ "message": ... }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorCode {
    ValidationFailed,
    DuplicateEmail,
    InvalidCredentials,
    InvalidToken,
    InvalidOrExpiredToken,
    Unauthorized,
    Forbidden,
    NotFound,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Value,
}

impl ApiError {
    #[must_use]
    pub fn new(code: ApiErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
        }
    }

    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::ValidationFailed, message, json!({}))
    }

    #[must_use]
    pub fn duplicate_email() -> Self {
        Self::new(
            ApiErrorCode::DuplicateEmail,
            "User already exists",
            json!({}),
        )
    }

    /// Uniform credential failure; the same message covers unknown email
    /// and wrong password so callers cannot enumerate accounts.
    #[must_use]
    pub fn invalid_credentials() -> Self {
        Self::new(
            ApiErrorCode::InvalidCredentials,
            "Invalid email or password",
            json!({}),
        )
    }

    #[must_use]
    pub fn invalid_token() -> Self {
        Self::new(ApiErrorCode::InvalidToken, "Invalid token", json!({}))
    }

    #[must_use]
    pub fn invalid_or_expired_token() -> Self {
        Self::new(
            ApiErrorCode::InvalidOrExpiredToken,
            "Invalid or expired token",
            json!({}),
        )
    }

    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Unauthorized, message, json!({}))
    }

    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Forbidden, message, json!({}))
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::NotFound, message, json!({}))
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Internal, message, json!({}))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<crewboard_model::ValidationError> for ApiError {
    fn from(value: crewboard_model::ValidationError) -> Self {
        Self::validation(value.0)
    }
}
