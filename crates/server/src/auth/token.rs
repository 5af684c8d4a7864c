use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::database::models::User;
use crate::database::types::DUuid;
use crate::database::Database;
use crate::error::Error;

const TOKEN_BYTES: usize = 32;

fn generate() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Issue a fresh opaque bearer token for a user and persist it.
pub async fn issue(user_id: Uuid, db: &Database) -> Result<String, Error> {
    let token = generate();

    sqlx::query("INSERT INTO auth_tokens (token, user_id, created_at) VALUES (?1, ?2, ?3)")
        .bind(&token)
        .bind(DUuid::from(user_id))
        .bind(OffsetDateTime::now_utc())
        .execute(&**db)
        .await?;

    Ok(token)
}

/// Resolve a bearer token to its user. An unknown token (or one whose user
/// is gone) maps to `Unauthenticated`.
pub async fn resolve(token: &str, db: &Database) -> Result<User, Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT u.id, u.email, u.username, u.password_hash, u.created_at, u.updated_at
        FROM auth_tokens t
        INNER JOIN users u ON u.id = t.user_id
        WHERE t.token = ?1
        "#,
    )
    .bind(token)
    .fetch_optional(&**db)
    .await?;

    user.ok_or(Error::Unauthenticated)
}
