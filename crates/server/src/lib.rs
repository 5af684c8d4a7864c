// Service modules
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod http_server;
pub mod process;
pub mod state;

// Re-exports for consumers (CLI, tests)
pub use config::Config as ServiceConfig;
pub use error::Error;
pub use process::{spawn_service, start_service, ShutdownHandle};
pub use state::State as ServiceState;
