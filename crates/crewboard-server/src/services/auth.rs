use crate::password::{hash_password, validate_password, verify_password};
use crate::services::{fresh_id, store_err};
use crate::{sha256_hex, AppState};
use chrono::{Duration, Utc};
use crewboard_api::{ApiError, AuthResponse, MessageResponse, UserProfile};
use crewboard_model::{Role, User, UserId};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub password: Option<String>,
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, ApiError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::validation(format!("{name} is required"))),
    }
}

pub async fn register(state: &AppState, payload: RegisterRequest) -> Result<AuthResponse, ApiError> {
    let username = required(&payload.username, "username")?.to_string();
    let email = required(&payload.email, "email")?.to_lowercase();
    let password = required(&payload.password, "password")?;
    if !email.contains('@') {
        return Err(ApiError::validation("email is invalid"));
    }
    validate_password(password)?;
    let password_hash = hash_password(password)?;

    let verification_token = Uuid::new_v4().simple().to_string();
    let user = User {
        id: fresh_id(UserId::parse)?,
        username,
        email: email.clone(),
        password_hash,
        role: Role::Member,
        is_verified: false,
        verification_token: Some(verification_token.clone()),
        reset_token_hash: None,
        reset_expires_at: None,
        created_at: Utc::now(),
    };

    let token = {
        let store = state.store.lock().await;
        if store.find_user_by_email(&email).map_err(store_err)?.is_some() {
            return Err(ApiError::duplicate_email());
        }
        store.insert_user(&user).map_err(store_err)?;
        state.tokens.issue(&user.id, Utc::now())?
    };

    // Verification email is a simulation-grade collaborator; a delivery
    // failure must not undo the registration.
    if let Err(err) = state
        .mailer
        .send(
            &email,
            "Verify your email",
            &format!("Verification token: {verification_token}"),
        )
        .await
    {
        tracing::warn!(email = %email, "verification email failed: {err}");
    }

    Ok(AuthResponse {
        token,
        user: UserProfile::from(&user),
    })
}

pub async fn login(state: &AppState, payload: LoginRequest) -> Result<AuthResponse, ApiError> {
    let email = required(&payload.email, "email")?.to_lowercase();
    let password = required(&payload.password, "password")?;

    let store = state.store.lock().await;
    let user = store.find_user_by_email(&email).map_err(store_err)?;
    // Unknown email and wrong password must be indistinguishable.
    let user = user.ok_or_else(ApiError::invalid_credentials)?;
    if !verify_password(password, &user.password_hash) {
        return Err(ApiError::invalid_credentials());
    }
    let token = state.tokens.issue(&user.id, Utc::now())?;
    Ok(AuthResponse {
        token,
        user: UserProfile::from(&user),
    })
}

pub async fn verify_email(state: &AppState, token: &str) -> Result<MessageResponse, ApiError> {
    let store = state.store.lock().await;
    let mut user = store
        .find_user_by_verification_token(token)
        .map_err(store_err)?
        .ok_or_else(ApiError::invalid_token)?;
    user.is_verified = true;
    user.verification_token = None;
    store.update_user(&user).map_err(store_err)?;
    Ok(MessageResponse::new("Email verified successfully"))
}

pub async fn forgot_password(
    state: &AppState,
    payload: ForgotPasswordRequest,
) -> Result<MessageResponse, ApiError> {
    let email = required(&payload.email, "email")?.to_lowercase();

    let raw_token = Uuid::new_v4().simple().to_string();
    {
        let store = state.store.lock().await;
        let mut user = store
            .find_user_by_email(&email)
            .map_err(store_err)?
            .ok_or_else(|| ApiError::not_found("User not found"))?;
        // Only the one-way hash is persisted; the raw token exists in
        // the outbound email and nowhere else.
        let token_hash = sha256_hex(raw_token.as_bytes());
        let expires_at = Utc::now()
            + Duration::from_std(state.config.reset_token_ttl)
                .map_err(|e| ApiError::internal(format!("reset ttl invalid: {e}")))?;
        user.set_reset_token(token_hash, expires_at);
        store.update_user(&user).map_err(store_err)?;
    }

    state
        .mailer
        .send(
            &email,
            "Password reset token",
            &format!("Reset token: {raw_token}"),
        )
        .await?;

    Ok(MessageResponse::new("Email sent"))
}

pub async fn reset_password(
    state: &AppState,
    token: &str,
    payload: ResetPasswordRequest,
) -> Result<AuthResponse, ApiError> {
    let password = required(&payload.password, "password")?;
    validate_password(password)?;

    let token_hash = sha256_hex(token.as_bytes());
    let store = state.store.lock().await;
    let mut user = store
        .find_user_by_reset_token_hash(&token_hash)
        .map_err(store_err)?
        .ok_or_else(ApiError::invalid_or_expired_token)?;
    match user.reset_expires_at {
        Some(expiry) if expiry > Utc::now() => {}
        _ => return Err(ApiError::invalid_or_expired_token()),
    }

    user.password_hash = hash_password(password)?;
    user.clear_reset_token();
    store.update_user(&user).map_err(store_err)?;

    let fresh = state.tokens.issue(&user.id, Utc::now())?;
    Ok(AuthResponse {
        token: fresh,
        user: UserProfile::from(&user),
    })
}
