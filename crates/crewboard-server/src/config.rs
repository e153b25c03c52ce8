use std::env;
use std::time::Duration;

pub const DEFAULT_TOKEN_TTL_SECS: u64 = 30 * 24 * 60 * 60;
pub const RESET_TOKEN_TTL: Duration = Duration::from_secs(10 * 60);

/// Runtime knobs resolved from the environment in `main`; tests build
/// this directly.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub token_secret: String,
    pub token_ttl: Duration,
    pub reset_token_ttl: Duration,
    pub max_body_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            token_secret: "crewboard-dev-secret".to_string(),
            token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_SECS),
            reset_token_ttl: RESET_TOKEN_TTL,
            max_body_bytes: 16 * 1024,
        }
    }
}

pub fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

pub fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

pub fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_bool_accepts_common_spellings() {
        std::env::set_var("CREWBOARD_TEST_FLAG", "yes");
        assert!(env_bool("CREWBOARD_TEST_FLAG", false));
        std::env::set_var("CREWBOARD_TEST_FLAG", "0");
        assert!(!env_bool("CREWBOARD_TEST_FLAG", true));
        std::env::set_var("CREWBOARD_TEST_FLAG", "maybe");
        assert!(env_bool("CREWBOARD_TEST_FLAG", true));
        std::env::remove_var("CREWBOARD_TEST_FLAG");
    }
}
