use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

pub mod login;
pub mod me;
pub mod register;

use crate::database::models::User;
use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/register", post(register::handler))
        .route("/login", post(login::handler))
        .route("/me", get(me::handler))
        .with_state(state)
}

/// Public view of an account; the password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for UserInfo {
    fn from(u: User) -> Self {
        Self {
            id: *u.id,
            email: u.email,
            username: u.username,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Body shared by register and login: the account plus a fresh token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthData {
    pub user: UserInfo,
    pub token: String,
}
