//! # keyscan
//!
//! Watches a stream of memory writes for the moment an elliptic-curve private
//! key sits in memory as contiguous bytes.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! keyscan = "0.3"
//! ```
//!
//! ```
//! use keyscan::prelude::*;
//!
//! // y² = x³ + 2x + 2 over F_17 with generator (5, 1); 10·G = (7, 11)
//! let curve = Curve::from_strs("17", "2", "2")?;
//! let g = curve.point_from_strs("5", "1")?;
//! let public = curve.point_from_strs("7", "11")?;
//!
//! let mut scanner = Scanner::new(KeyVerifier::new(&curve, &g, &public), None)?;
//! scanner.observe_write(ProgramPoint::new(0x1, 0x2, 0x3), &[0x04, 0x0a, 0x07]);
//! assert!(scanner.is_match(&ProgramPoint::new(0x1, 0x2, 0x3)));
//! # Ok::<(), keyscan::api::Error>(())
//! ```
//!
//! ## Features
//!
//! - `scanner` (default): the streaming scanner, configuration and replay
//! - `serde`: serde support for [`api::ProgramPoint`]
//! - `full`: all features enabled
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`keyscan-api`]: Error type and shared identifiers
//! - [`keyscan-params`]: Named curves and limits
//! - [`keyscan-algorithms`]: Curve arithmetic and key verification
//! - [`keyscan-scanner`]: Per-context windows, admission filter and replay

// Core re-exports (always available)
pub use keyscan_algorithms as algorithms;
pub use keyscan_api as api;
pub use keyscan_params as params;

// Feature-gated re-exports
#[cfg(feature = "scanner")]
pub use keyscan_scanner as scanner;

/// Common imports for keyscan users
pub mod prelude {
    pub use crate::api::{Error, ProgramPoint, Result};

    pub use crate::algorithms::ec::{Curve, KeyVerifier, Point, PrecomputedTable};

    #[cfg(feature = "scanner")]
    pub use crate::scanner::{AdmissionFilter, RegionGate, ScanConfig, Scanner, WindowState};
}
