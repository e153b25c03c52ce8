#![forbid(unsafe_code)]
//! crewboard REST service: axum handlers over the document store, with
//! HMAC bearer authentication and per-request tracing.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;
use crewboard_store::Store;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tokio::sync::Mutex;

pub mod config;
pub mod http;
pub mod mailer;
pub mod middleware;
pub mod password;
pub mod services;
pub mod token;

pub use config::ApiConfig;
pub use mailer::{LogMailer, Mailer};
pub use token::TokenSigner;

pub const CRATE_NAME: &str = "crewboard-server";

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<Store>>,
    pub config: Arc<ApiConfig>,
    pub tokens: Arc<TokenSigner>,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Store, config: ApiConfig) -> Self {
        Self::with_mailer(store, config, Arc::new(LogMailer))
    }

    #[must_use]
    pub fn with_mailer(store: Store, config: ApiConfig, mailer: Arc<dyn Mailer>) -> Self {
        let tokens = Arc::new(TokenSigner::new(&config.token_secret, config.token_ttl));
        Self {
            store: Arc::new(Mutex::new(store)),
            config: Arc::new(config),
            tokens,
            mailer,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.max_body_bytes;
    Router::new()
        .route("/healthz", get(http::misc::healthz_handler))
        .route("/auth/register", post(http::auth::register_handler))
        .route("/auth/login", post(http::auth::login_handler))
        .route("/auth/verify/{token}", get(http::auth::verify_email_handler))
        .route(
            "/auth/forgotpassword",
            post(http::auth::forgot_password_handler),
        )
        .route(
            "/auth/resetpassword/{token}",
            put(http::auth::reset_password_handler),
        )
        .route(
            "/tasks",
            get(http::tasks::list_tasks_handler).post(http::tasks::create_task_handler),
        )
        .route("/tasks/export", get(http::tasks::export_tasks_handler))
        .route(
            "/tasks/{id}",
            get(http::tasks::get_task_handler)
                .put(http::tasks::update_task_handler)
                .delete(http::tasks::delete_task_handler),
        )
        .route(
            "/tasks/{task_id}/subtasks",
            get(http::subtasks::list_subtasks_handler)
                .post(http::subtasks::create_subtask_handler),
        )
        .route(
            "/subtasks/{id}",
            get(http::subtasks::get_subtask_handler)
                .put(http::subtasks::update_subtask_handler)
                .delete(http::subtasks::delete_subtask_handler),
        )
        .route(
            "/tasks/{task_id}/comments",
            get(http::comments_logs::list_comments_handler)
                .post(http::comments_logs::add_comment_handler),
        )
        .route(
            "/tasks/{task_id}/logs",
            get(http::comments_logs::list_logs_handler),
        )
        .route(
            "/notifications",
            get(http::notifications::list_notifications_handler),
        )
        .route(
            "/notifications/{id}/read",
            put(http::notifications::mark_read_handler),
        )
        .route("/users", get(http::users::list_users_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::request_tracing::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(max_body))
        .with_state(state)
}
