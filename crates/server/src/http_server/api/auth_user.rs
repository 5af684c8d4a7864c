use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::RequestPartsExt;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use uuid::Uuid;

use crate::auth::token;
use crate::error::Error;
use crate::ServiceState;

/// The authenticated requester, resolved from the bearer token on every
/// request. Handlers receive the user id as an explicit argument; there is
/// no ambient request context.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub username: String,
}

#[async_trait::async_trait]
impl FromRequestParts<ServiceState> for AuthUser {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServiceState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| Error::Unauthenticated)?;

        let user = token::resolve(bearer.token(), state.database()).await?;

        Ok(AuthUser {
            id: *user.id,
            email: user.email,
            username: user.username,
        })
    }
}
