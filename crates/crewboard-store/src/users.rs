use crate::{is_unique_violation, Store, StoreError};
use crewboard_model::{User, UserId};
use rusqlite::{params, OptionalExtension};

impl Store {
    /// Inserts a new user; a unique-email violation surfaces as
    /// `StoreError::Duplicate("email")` so the service can map it.
    pub fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let doc = serde_json::to_string(user)?;
        self.conn()
            .execute(
                "INSERT INTO users (id, username, email, verification_token, reset_token_hash, doc)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    user.id.as_str(),
                    user.username,
                    user.email,
                    user.verification_token,
                    user.reset_token_hash,
                    doc
                ],
            )
            .map_err(|err| {
                if is_unique_violation(&err) {
                    StoreError::Duplicate("email")
                } else {
                    StoreError::Sql(err)
                }
            })?;
        Ok(())
    }

    /// Rewrites the full document and the filter columns in one step.
    pub fn update_user(&self, user: &User) -> Result<(), StoreError> {
        let doc = serde_json::to_string(user)?;
        let changed = self.conn().execute(
            "UPDATE users
             SET username = ?2, email = ?3, verification_token = ?4, reset_token_hash = ?5, doc = ?6
             WHERE id = ?1",
            params![
                user.id.as_str(),
                user.username,
                user.email,
                user.verification_token,
                user.reset_token_hash,
                doc
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownId);
        }
        Ok(())
    }

    pub fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        self.find_user("SELECT doc FROM users WHERE id = ?1", id.as_str())
    }

    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.find_user("SELECT doc FROM users WHERE email = ?1", email)
    }

    pub fn find_user_by_verification_token(
        &self,
        token: &str,
    ) -> Result<Option<User>, StoreError> {
        self.find_user(
            "SELECT doc FROM users WHERE verification_token = ?1",
            token,
        )
    }

    pub fn find_user_by_reset_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<User>, StoreError> {
        self.find_user(
            "SELECT doc FROM users WHERE reset_token_hash = ?1",
            token_hash,
        )
    }

    pub fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let mut stmt = self
            .conn()
            .prepare("SELECT doc FROM users ORDER BY username ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut users = Vec::new();
        for doc in rows {
            users.push(serde_json::from_str(&doc?)?);
        }
        Ok(users)
    }

    fn find_user(&self, sql: &str, key: &str) -> Result<Option<User>, StoreError> {
        let doc: Option<String> = self
            .conn()
            .query_row(sql, params![key], |row| row.get(0))
            .optional()?;
        match doc {
            Some(doc) => Ok(Some(serde_json::from_str(&doc)?)),
            None => Ok(None),
        }
    }
}
