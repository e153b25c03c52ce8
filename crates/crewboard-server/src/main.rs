#![forbid(unsafe_code)]

use crewboard_server::config::{env_bool, env_u64, env_usize, DEFAULT_TOKEN_TTL_SECS};
use crewboard_server::{build_router, ApiConfig, AppState};
use crewboard_store::Store;
use std::env;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if env_bool("CREWBOARD_LOG_JSON", false) {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn config_from_env() -> ApiConfig {
    let defaults = ApiConfig::default();
    ApiConfig {
        token_secret: env::var("CREWBOARD_TOKEN_SECRET").unwrap_or(defaults.token_secret),
        token_ttl: Duration::from_secs(env_u64(
            "CREWBOARD_TOKEN_TTL_SECS",
            DEFAULT_TOKEN_TTL_SECS,
        )),
        reset_token_ttl: defaults.reset_token_ttl,
        max_body_bytes: env_usize("CREWBOARD_MAX_BODY_BYTES", defaults.max_body_bytes),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("ctrl-c handler failed: {err}");
        }
    };
    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => tracing::error!("sigterm handler failed: {err}"),
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let bind = env::var("CREWBOARD_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let db_path = env::var("CREWBOARD_DB_PATH").unwrap_or_else(|_| "crewboard.db".to_string());

    let store = Store::open(&db_path)?;
    let state = AppState::new(store, config_from_env());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!(addr = %listener.local_addr()?, db = %db_path, "crewboard listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
