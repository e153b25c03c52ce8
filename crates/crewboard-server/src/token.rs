//! Opaque bearer credentials: `v1.<payload>.<signature>` where the
//! payload is base64url JSON carrying the subject and expiry, and the
//! signature is HMAC-SHA256 over the payload part.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use crewboard_api::ApiError;
use crewboard_model::UserId;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::time::Duration;

type HmacSha256 = Hmac<Sha256>;

const TOKEN_VERSION_V1: &str = "v1";
const MAX_TOKEN_LEN: usize = 1024;

#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    sub: String,
    exp: i64,
}

pub struct TokenSigner {
    secret: Vec<u8>,
    ttl: Duration,
}

impl TokenSigner {
    #[must_use]
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            ttl,
        }
    }

    pub fn issue(&self, user: &UserId, now: DateTime<Utc>) -> Result<String, ApiError> {
        let claims = TokenClaims {
            sub: user.as_str().to_string(),
            exp: now.timestamp() + self.ttl.as_secs() as i64,
        };
        let payload = serde_json::to_vec(&claims)
            .map_err(|e| ApiError::internal(format!("token encoding failed: {e}")))?;
        let payload_part = URL_SAFE_NO_PAD.encode(payload);
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| ApiError::internal(format!("token key invalid: {e}")))?;
        mac.update(payload_part.as_bytes());
        let sig_part = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        Ok(format!("{TOKEN_VERSION_V1}.{payload_part}.{sig_part}"))
    }

    /// Checks shape, signature, and expiry; returns the subject. The
    /// user lookup belongs to the caller-resolution step, not here.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, ApiError> {
        if token.len() > MAX_TOKEN_LEN {
            return Err(ApiError::unauthorized("Not authorized, token failed"));
        }
        let mut parts = token.splitn(3, '.');
        let (version, payload_part, sig_part) =
            match (parts.next(), parts.next(), parts.next()) {
                (Some(v), Some(p), Some(s)) => (v, p, s),
                _ => return Err(ApiError::unauthorized("Not authorized, token failed")),
            };
        if version != TOKEN_VERSION_V1 {
            return Err(ApiError::unauthorized("Not authorized, token failed"));
        }

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| ApiError::internal(format!("token key invalid: {e}")))?;
        mac.update(payload_part.as_bytes());
        let expected = URL_SAFE_NO_PAD
            .decode(sig_part)
            .map_err(|_| ApiError::unauthorized("Not authorized, token failed"))?;
        mac.verify_slice(&expected)
            .map_err(|_| ApiError::unauthorized("Not authorized, token failed"))?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_part)
            .map_err(|_| ApiError::unauthorized("Not authorized, token failed"))?;
        let claims: TokenClaims = serde_json::from_slice(&payload)
            .map_err(|_| ApiError::unauthorized("Not authorized, token failed"))?;
        if claims.exp <= now.timestamp() {
            return Err(ApiError::unauthorized("Not authorized, token expired"));
        }
        UserId::parse(&claims.sub)
            .map_err(|_| ApiError::unauthorized("Not authorized, token failed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    fn signer() -> TokenSigner {
        TokenSigner::new("unit-test-secret", Duration::from_secs(3600))
    }

    #[test]
    fn issue_then_verify_round_trips() {
        let signer = signer();
        let user = UserId::parse("u1").unwrap();
        let now = Utc::now();
        let token = signer.issue(&user, now).unwrap();
        assert_eq!(signer.verify(&token, now).unwrap(), user);
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let signer = signer();
        let user = UserId::parse("u1").unwrap();
        let token = signer.issue(&user, Utc::now()).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = URL_SAFE_NO_PAD.encode(br#"{"sub":"admin","exp":99999999999}"#);
        parts[1] = &forged;
        let forged_token = parts.join(".");
        assert!(signer.verify(&forged_token, Utc::now()).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = signer()
            .issue(&UserId::parse("u1").unwrap(), Utc::now())
            .unwrap();
        let other = TokenSigner::new("other-secret", Duration::from_secs(3600));
        assert!(other.verify(&token, Utc::now()).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let signer = signer();
        let user = UserId::parse("u1").unwrap();
        let issued = Utc::now();
        let token = signer.issue(&user, issued).unwrap();
        let later = issued + ChronoDuration::hours(2);
        assert!(signer.verify(&token, later).is_err());
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let signer = signer();
        for bad in ["", "v1", "v1.only-two", "v2.a.b", "not a token at all"] {
            assert!(signer.verify(bad, Utc::now()).is_err(), "accepted: {bad}");
        }
    }
}
