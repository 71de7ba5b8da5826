// handlers/public/mod.rs - routes reachable without a session
pub mod auth;
pub mod health;
pub mod pages;

pub use auth::*;
pub use health::*;
pub use pages::*;
