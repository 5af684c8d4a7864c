pub mod auth;
pub mod health;
pub mod notes;
pub mod serve;
pub mod version;

pub use auth::Auth;
pub use health::Health;
pub use notes::Notes;
pub use serve::Serve;
pub use version::Version;
