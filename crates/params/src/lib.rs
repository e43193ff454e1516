//! Constant values for the keyscan workspace
//!
//! Curve parameters are kept as hexadecimal strings exactly as they appear in
//! the standards documents, so they can go through the same parser as
//! user-supplied configuration.

#![no_std]

pub mod curves;
pub mod limits;

pub use curves::{NamedCurve, P256, P384, SECP256K1};
pub use limits::{
    ASSUMED_REGION_SIZE, DEFAULT_CANDIDATES_FILE, DEFAULT_CONFIG_FILE, DEFAULT_REPORT_FILE,
    MAX_KEY_SIZE,
};
