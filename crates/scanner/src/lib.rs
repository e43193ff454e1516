//! Streaming private-key scanner
//!
//! A harness reports every byte written to memory together with the
//! [`ProgramPoint`] that wrote it. For each program point the scanner keeps a
//! sliding window of the most recent `key_size` bytes and, once the window is
//! full, checks every position of it against the configured public key.
//!
//! ```text
//! byte write ─▶ AdmissionFilter ─▶ ContextWindowTracker ─▶ KeyVerifier ─▶ match set
//! ```
//!
//! The crate also carries the pieces around that core: configuration
//! loading, the region gate a harness uses to decide where to watch writes,
//! the match report, and an offline replay of recorded tap dumps.

#![forbid(unsafe_code)]

pub mod admission;
pub mod config;
pub mod gate;
pub mod replay;
pub mod report;
pub mod scanner;
pub mod window;

pub use admission::AdmissionFilter;
pub use config::{CurveConfig, ScanConfig};
pub use gate::{GateStats, RegionGate};
pub use keyscan_api::{Error, ProgramPoint, Result};
pub use replay::{replay, replay_files, ReplaySummary, TapIndex, TapRecord};
pub use report::{write_match_file, write_matches};
pub use scanner::{ScanStats, Scanner};
pub use window::{ContextWindow, ContextWindowTracker, WindowState};
