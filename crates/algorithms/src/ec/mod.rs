//! Elliptic Curve Primitives
//!
//! Short Weierstrass curves y² = x³ + a·x + b over a prime field, with points
//! held in Jacobian projective coordinates so that the hot path never needs a
//! field inversion. Arbitrary `a` is supported; nothing assumes `a = -3`.
//!
//! The pieces stack up as follows:
//! - [`PrimeField`]: reduction, add/sub/mul and inversion modulo p
//! - [`Curve`]: doubling, mixed addition, normalization and equality
//! - [`PrecomputedTable`]: 2^i·G for every bit of p, turning scalar
//!   multiplication into a subset sum
//! - [`KeyVerifier`]: candidate bytes → scalar → point → compare

mod curve;
mod field;
pub mod named;
mod point;
mod table;
mod verify;

pub use curve::Curve;
pub use field::PrimeField;
pub use point::Point;
pub use table::PrecomputedTable;
pub use verify::{verify, KeyVerifier};
