// Sub-modules organized by functional domain
pub mod allocation;
pub mod api;
pub mod assignment;
pub mod project;
pub mod request;
pub mod user;
pub mod worklog;

// Re-export all models so handlers can `use crate::db::models::*`
pub use allocation::*;
pub use api::*;
pub use assignment::*;
pub use project::*;
pub use request::*;
pub use user::*;
pub use worklog::*;
