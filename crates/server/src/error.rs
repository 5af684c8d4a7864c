/// Failure taxonomy shared by every repository and auth operation.
///
/// `NotFoundOrDenied` deliberately folds "does not exist" and "requester
/// lacks access" into one kind so callers cannot probe for resources they
/// cannot see. The HTTP layer owns the mapping to status codes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    InvalidInput(String),

    #[error("not found or access denied")]
    NotFoundOrDenied,

    #[error("{0}")]
    Conflict(String),

    #[error("authentication required")]
    Unauthenticated,

    #[error("storage error: {0}")]
    Upstream(#[from] sqlx::Error),
}

impl Error {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Error::Conflict(msg.into())
    }

    /// True when the wrapped storage error is a unique-constraint violation.
    pub fn is_unique_violation(err: &sqlx::Error) -> bool {
        err.as_database_error()
            .map(|db| db.is_unique_violation())
            .unwrap_or(false)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
