mod dbool;
mod duuid;
mod permission;

pub use dbool::DBool;
pub use duuid::DUuid;
pub use permission::Permission;
