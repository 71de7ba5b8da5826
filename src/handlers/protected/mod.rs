// handlers/protected/mod.rs - place routes
//
// Wrapped by `middleware::require_identity` when the authenticated variant
// is enabled. Handlers read the caller through the `Owner` extractor, which
// is empty when auth is off.
pub mod places;

pub use places::*;
