pub mod auth;
pub mod response;

pub use auth::{require_identity, Owner};
pub use response::{ApiResponse, ApiResult};
