//! Self-hosted identity provider: Argon2id password storage plus opaque
//! server-side bearer tokens. The rest of the system only ever sees the
//! stable user id this module resolves.

pub mod password;
pub mod token;

use crate::database::models::User;
use crate::database::Database;
use crate::error::Error;

const PASSWORD_MIN: usize = 8;

/// Register a new account and issue its first token.
pub async fn register(
    email: &str,
    username: &str,
    plaintext: &str,
    db: &Database,
) -> Result<(User, String), Error> {
    if plaintext.len() < PASSWORD_MIN {
        return Err(Error::invalid(format!(
            "Password must be at least {} characters",
            PASSWORD_MIN
        )));
    }

    let digest = password::hash(plaintext).map_err(|e| {
        tracing::error!("password hashing failed: {}", e);
        Error::invalid("Unable to process password")
    })?;

    let user = User::create(email, username, &digest, db).await?;
    let token = token::issue(*user.id, db).await?;

    Ok((user, token))
}

/// Verify credentials and issue a token. Unknown email and wrong password
/// are indistinguishable to the caller.
pub async fn login(email: &str, plaintext: &str, db: &Database) -> Result<(User, String), Error> {
    let user = User::get_by_email(email, db)
        .await?
        .ok_or(Error::Unauthenticated)?;

    let matches = password::verify(plaintext, &user.password_hash).map_err(|e| {
        tracing::error!(user_id = %user.id, "stored password hash unreadable: {}", e);
        Error::Unauthenticated
    })?;
    if !matches {
        return Err(Error::Unauthenticated);
    }

    let token = token::issue(*user.id, db).await?;
    Ok((user, token))
}
