//! Precomputed doublings of the generator

use crate::ec::curve::Curve;
use crate::ec::point::Point;
use keyscan_api::{Error, Result};
use num_bigint::BigUint;

fn normalized(curve: &Curve, p: &Point, i: usize) -> Result<Point> {
    let entry = if curve.check(p) {
        curve.try_normalize(p)
    } else {
        None
    };
    entry.ok_or_else(|| {
        Error::param(
            "curve modulus p",
            format!("2^{}·G has no affine form; p is not prime", i),
        )
    })
}

/// The affine points 2^i·G for i in `0..bits(p)`
///
/// Built once per (curve, generator) pair and read-only afterwards, so a
/// table can be shared between threads behind an `Arc` with no locking.
#[derive(Clone, Debug)]
pub struct PrecomputedTable {
    curve: Curve,
    generator: Point,
    entries: Vec<Point>,
}

impl PrecomputedTable {
    /// Build the table: entry 0 is G normalized, entry i is
    /// normalize(double(entry i-1))
    ///
    /// # Panics
    ///
    /// Panics if `generator` is not on `curve`, or if a doubling cannot be
    /// normalized. Use [`PrecomputedTable::try_build`] for untrusted curves.
    pub fn build(curve: &Curve, generator: &Point) -> Self {
        match Self::try_build(curve, generator) {
            Ok(table) => table,
            Err(e) => panic!("precomputed table: {}", e),
        }
    }

    /// Build the table, failing when some 2^i·G has a non-invertible z
    ///
    /// With a prime modulus this never fails. A composite modulus usually
    /// shows up here as an `InvalidParameter` error on `p`.
    ///
    /// # Panics
    ///
    /// Panics if `generator` is not on `curve`. Use [`Curve::point`] to
    /// obtain a validated generator.
    pub fn try_build(curve: &Curve, generator: &Point) -> Result<Self> {
        let bits = curve.field().bits();
        let mut entries = Vec::with_capacity(bits);
        entries.push(normalized(curve, generator, 0)?);
        for i in 1..bits {
            let doubled = curve.double(&entries[i - 1]);
            entries.push(normalized(curve, &doubled, i)?);
        }
        debug_assert!(entries.iter().all(|e| curve.is_normalized(e)));

        Ok(Self {
            curve: curve.clone(),
            generator: generator.clone(),
            entries,
        })
    }

    /// The curve this table was built for
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// The generator the table was built from
    pub fn generator(&self) -> &Point {
        &self.generator
    }

    /// Number of precomputed entries, equal to the bit length of p
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a successfully built table
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry `i`, i.e. 2^i·G in affine form
    pub fn get(&self, i: usize) -> Option<&Point> {
        self.entries.get(i)
    }

    /// Size in bytes of a candidate private key for this curve
    pub fn key_size_bytes(&self) -> usize {
        self.curve.field().size_bytes()
    }

    /// Compute scalar·G as a sum of table entries
    ///
    /// Starting from the identity, adds entry i for every set bit i of
    /// `scalar`, least significant first. Bits at or above the table length
    /// are ignored, and a zero scalar yields the identity. The result is
    /// left in Jacobian form.
    pub fn scalar_multiply(&self, scalar: &BigUint) -> Point {
        let limit = (scalar.bits() as usize).min(self.entries.len());
        let mut acc = Point::identity();
        for (i, entry) in self.entries.iter().enumerate().take(limit) {
            if scalar.bit(i as u64) {
                acc = self.curve.add(&acc, entry);
            }
        }
        acc
    }
}
