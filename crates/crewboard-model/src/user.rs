use crate::ids::UserId;
use crate::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Member,
    Admin,
}

impl Role {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match input {
            "member" => Ok(Self::Member),
            "admin" => Ok(Self::Admin),
            other => Err(ValidationError(format!("invalid role: {other}"))),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Member
    }
}

/// Persisted user record. The password is stored hashed; the reset pair
/// (`reset_token_hash`, `reset_expires_at`) is either both set or both
/// cleared. Users are never hard-deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub verification_token: Option<String>,
    #[serde(default)]
    pub reset_token_hash: Option<String>,
    #[serde(default)]
    pub reset_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Sets the reset pair together; the invariant is that neither field
    /// exists without the other.
    pub fn set_reset_token(&mut self, token_hash: String, expires_at: DateTime<Utc>) {
        self.reset_token_hash = Some(token_hash);
        self.reset_expires_at = Some(expires_at);
    }

    pub fn clear_reset_token(&mut self) {
        self.reset_token_hash = None;
        self.reset_expires_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_user() -> User {
        User {
            id: UserId::parse("u1").unwrap(),
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: Role::Member,
            is_verified: false,
            verification_token: Some("tok".to_string()),
            reset_token_hash: None,
            reset_expires_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn role_wire_strings_are_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(Role::parse("member").unwrap(), Role::Member);
        assert!(Role::parse("Admin").is_err());
    }

    #[test]
    fn reset_pair_set_and_cleared_together() {
        let mut user = sample_user();
        user.set_reset_token("hash".to_string(), Utc::now() + Duration::minutes(10));
        assert!(user.reset_token_hash.is_some() && user.reset_expires_at.is_some());
        user.clear_reset_token();
        assert!(user.reset_token_hash.is_none() && user.reset_expires_at.is_none());
    }
}
