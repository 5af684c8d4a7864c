use url::Url;

use crate::config::Config;
use crate::database::{Database, DatabaseSetupError};

/// Main service state. Holds only the pool-backed database handle; all
/// mutable state lives in the store.
#[derive(Clone)]
pub struct State {
    database: Database,
}

impl State {
    pub async fn from_config(config: &Config) -> Result<Self, StateSetupError> {
        let sqlite_database_url = match config.sqlite_path {
            Some(ref path) => Url::parse(&format!("sqlite://{}", path.display()))
                .map_err(|_| StateSetupError::InvalidDatabaseUrl),
            // otherwise just set up an in-memory database
            None => Url::parse("sqlite::memory:").map_err(|_| StateSetupError::InvalidDatabaseUrl),
        }?;
        tracing::info!("Database URL: {:?}", sqlite_database_url);
        let database = Database::connect(&sqlite_database_url).await?;

        Ok(Self { database })
    }

    pub fn database(&self) -> &Database {
        &self.database
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("invalid database url")]
    InvalidDatabaseUrl,

    #[error("database setup failed: {0}")]
    Database(#[from] DatabaseSetupError),
}
