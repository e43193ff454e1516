//! Jacobian point representation

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// A curve point in Jacobian coordinates (X:Y:Z), affine x = X/Z², y = Y/Z³
///
/// `z = 0` is the point at infinity. Points are plain values; every curve
/// operation returns a fresh point and leaves its inputs untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Point {
    pub(crate) x: BigUint,
    pub(crate) y: BigUint,
    pub(crate) z: BigUint,
}

impl Point {
    /// The identity element, represented as (1 : 1 : 0)
    pub fn identity() -> Self {
        Self {
            x: BigUint::one(),
            y: BigUint::one(),
            z: BigUint::zero(),
        }
    }

    /// An affine point (x, y), stored with z = 1
    ///
    /// The coordinates must already be reduced modulo p; use
    /// [`Curve::point`](crate::ec::Curve::point) to reduce and validate.
    pub fn from_affine(x: BigUint, y: BigUint) -> Self {
        Self {
            x,
            y,
            z: BigUint::one(),
        }
    }

    /// Build a point from raw Jacobian coordinates
    pub fn from_jacobian(x: BigUint, y: BigUint, z: BigUint) -> Self {
        Self { x, y, z }
    }

    /// Check if this point is the identity element
    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    /// Check if this point is in affine form (z = 1)
    pub fn is_affine(&self) -> bool {
        self.z.is_one()
    }

    /// The X coordinate
    pub fn x(&self) -> &BigUint {
        &self.x
    }

    /// The Y coordinate
    pub fn y(&self) -> &BigUint {
        &self.y
    }

    /// The Z coordinate
    pub fn z(&self) -> &BigUint {
        &self.z
    }
}
