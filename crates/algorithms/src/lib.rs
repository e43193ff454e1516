//! Elliptic-curve arithmetic and private-key verification for keyscan
//!
//! This crate holds the pure, CPU-only half of the scanner: prime-field
//! arithmetic over arbitrary-precision integers, short Weierstrass curves in
//! Jacobian coordinates, a precomputed doubling table for the generator, and
//! the verifier that decides whether a byte window is the private key for a
//! known public point.
//!
//! Nothing here is constant-time. The engine inspects recorded memory, it is
//! not a signing primitive.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod bigint;
pub mod ec;

pub use ec::{Curve, KeyVerifier, Point, PrecomputedTable, PrimeField};
pub use keyscan_api::{Error, Result};
