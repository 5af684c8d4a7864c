use std::sync::LazyLock;

use regex::Regex;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::database::types::DUuid;
use crate::database::Database;
use crate::error::Error;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex must compile"));

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 100;

/// Registered account. The `password_hash` column is a PHC-format Argon2id
/// string owned by the auth layer; it never leaves the server.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DUuid,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl User {
    /// Create a new account. Email is lower-cased and trimmed before the
    /// uniqueness check; a duplicate email or username maps to `Conflict`.
    pub async fn create(
        email: &str,
        username: &str,
        password_hash: &str,
        db: &Database,
    ) -> Result<User, Error> {
        let email = email.trim().to_lowercase();
        let username = username.trim().to_string();

        if !EMAIL_RE.is_match(&email) {
            return Err(Error::invalid("Invalid email format"));
        }
        // Bounds are in characters, not bytes.
        let username_chars = username.chars().count();
        if username_chars < USERNAME_MIN || username_chars > USERNAME_MAX {
            return Err(Error::invalid(format!(
                "Username must be between {} and {} characters",
                USERNAME_MIN, USERNAME_MAX
            )));
        }

        let id = DUuid::new();
        let now = OffsetDateTime::now_utc();

        sqlx::query(
            r#"
            INSERT INTO users (id, email, username, password_hash, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(id)
        .bind(&email)
        .bind(&username)
        .bind(password_hash)
        .bind(now)
        .bind(now)
        .execute(&**db)
        .await
        .map_err(|e| {
            if Error::is_unique_violation(&e) {
                Error::conflict("Email or username already registered")
            } else {
                Error::Upstream(e)
            }
        })?;

        Self::get(*id, db).await?.ok_or(Error::NotFoundOrDenied)
    }

    pub async fn get(id: Uuid, db: &Database) -> Result<Option<User>, Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, username, password_hash, created_at, updated_at
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(DUuid::from(id))
        .fetch_optional(&**db)
        .await?;

        Ok(user)
    }

    pub async fn get_by_email(email: &str, db: &Database) -> Result<Option<User>, Error> {
        let email = email.trim().to_lowercase();
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, username, password_hash, created_at, updated_at
            FROM users
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(&**db)
        .await?;

        Ok(user)
    }

    /// Existence check used when validating a share grantee.
    pub async fn exists(id: Uuid, db: &Database) -> Result<bool, Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ?1")
            .bind(DUuid::from(id))
            .fetch_one(&**db)
            .await?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape() {
        assert!(EMAIL_RE.is_match("a@example.com"));
        assert!(EMAIL_RE.is_match("first.last@sub.example.org"));
        assert!(!EMAIL_RE.is_match("not-an-email"));
        assert!(!EMAIL_RE.is_match("spaces in@example.com"));
        assert!(!EMAIL_RE.is_match("missing@tld"));
    }
}
