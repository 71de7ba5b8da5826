// handlers/mod.rs - two-tier handler layout
//
// Public (no identity required) → Protected (identity guard when auth is on).
pub mod protected;
pub mod public;

pub use protected::*;
pub use public::*;
