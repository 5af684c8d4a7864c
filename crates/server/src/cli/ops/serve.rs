use std::path::PathBuf;

use clap::Args;

use quill::{spawn_service, ServiceConfig};

#[derive(Args, Debug, Clone)]
pub struct Serve {
    /// Port for the API server
    #[arg(long, default_value_t = 3000)]
    pub api_port: u16,

    /// Path to the sqlite database file (in-memory if not set)
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// Directory for log files (logs to stdout only if not set)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Log verbosity (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,
}

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("serve failed: {0}")]
    Failed(String),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Serve {
    type Error = ServeError;
    type Output = String;

    async fn execute(&self, _ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let config = ServiceConfig {
            api_port: self.api_port,
            sqlite_path: self.db_path.clone(),
            log_level: self.log_level,
            log_dir: self.log_dir.clone(),
        };

        spawn_service(&config).await;
        Ok("service ended".to_string())
    }
}
