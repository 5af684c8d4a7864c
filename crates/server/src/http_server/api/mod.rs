use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};

pub mod auth_user;
pub mod client;
pub mod envelope;
pub mod v0;

use crate::error::Error;
use crate::ServiceState;
use envelope::ApiResponse;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .nest("/v0", v0::router(state.clone()))
        .with_state(state)
}

/// The single place the failure taxonomy becomes transport status codes and
/// the uniform error envelope.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::NotFoundOrDenied => (StatusCode::NOT_FOUND, self.to_string()),
            Error::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            Error::Unauthenticated => (StatusCode::UNAUTHORIZED, self.to_string()),
            Error::Upstream(e) => {
                tracing::error!("storage failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}
