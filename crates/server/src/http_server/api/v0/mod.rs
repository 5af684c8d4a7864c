use axum::Router;

pub mod auth;
pub mod notes;
pub mod shares;
pub mod tags;
pub mod workspaces;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .nest("/auth", auth::router(state.clone()))
        .nest("/notes", notes::router(state.clone()))
        .nest("/tags", tags::router(state.clone()))
        .nest("/workspaces", workspaces::router(state.clone()))
        .nest("/shares", shares::router(state.clone()))
        .with_state(state)
}
