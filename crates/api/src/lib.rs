//! Public error types and shared identifiers for the keyscan workspace
//!
//! Every other keyscan crate reports failures through [`Error`] and keys its
//! per-location state on [`ProgramPoint`]. Nothing in here depends on the
//! curve arithmetic, so the identifiers can be shared freely between the
//! scanner and whatever harness feeds it.

pub mod error;
pub mod types;

// Re-export commonly used items at the crate level for convenience
pub use error::{validate, Error, Result, ResultExt};
pub use types::ProgramPoint;
