//! Checking candidate private keys against a known public key

use crate::ec::curve::Curve;
use crate::ec::point::Point;
use crate::ec::table::PrecomputedTable;
use keyscan_api::Result;
use num_bigint::BigUint;

/// Check whether `candidate` is the private key for `public_key`
///
/// The bytes are read as an unsigned big-endian integer with no reduction
/// modulo the group order; an out-of-range value just maps to some other
/// point. The function is pure, so callers may invoke it as often as they
/// like against a shared table.
pub fn verify(table: &PrecomputedTable, candidate: &[u8], public_key: &Point) -> bool {
    let scalar = BigUint::from_bytes_be(candidate);
    let candidate_point = table.scalar_multiply(&scalar);
    table.curve().equals(&candidate_point, public_key)
}

/// A precomputed table bound to the public key it is hunting for
///
/// Both halves are immutable after construction.
#[derive(Clone, Debug)]
pub struct KeyVerifier {
    table: PrecomputedTable,
    public_key: Point,
}

impl KeyVerifier {
    /// Build the generator table and pair it with the target public key
    ///
    /// # Panics
    ///
    /// Panics if either point is off the curve; construct both through
    /// [`Curve::point`] to get a recoverable error instead.
    pub fn new(curve: &Curve, generator: &Point, public_key: &Point) -> Self {
        assert!(curve.check(public_key), "public key is not on the curve");
        Self {
            table: PrecomputedTable::build(curve, generator),
            public_key: public_key.clone(),
        }
    }

    /// Like [`KeyVerifier::new`], but reports a table that cannot be built
    /// as an error
    ///
    /// # Panics
    ///
    /// Panics if either point is off the curve.
    pub fn try_new(curve: &Curve, generator: &Point, public_key: &Point) -> Result<Self> {
        assert!(curve.check(public_key), "public key is not on the curve");
        Ok(Self {
            table: PrecomputedTable::try_build(curve, generator)?,
            public_key: public_key.clone(),
        })
    }

    /// Create a verifier from an already built table
    pub fn with_table(table: PrecomputedTable, public_key: Point) -> Self {
        assert!(
            table.curve().check(&public_key),
            "public key is not on the curve"
        );
        Self { table, public_key }
    }

    /// The generator table
    pub fn table(&self) -> &PrecomputedTable {
        &self.table
    }

    /// The target public key
    pub fn public_key(&self) -> &Point {
        &self.public_key
    }

    /// The curve both points live on
    pub fn curve(&self) -> &Curve {
        self.table.curve()
    }

    /// Width of a candidate window in bytes
    pub fn key_size_bytes(&self) -> usize {
        self.table.key_size_bytes()
    }

    /// Check a raw big-endian byte window
    pub fn verify(&self, candidate: &[u8]) -> bool {
        verify(&self.table, candidate, &self.public_key)
    }

    /// Check an already decoded scalar
    pub fn verify_scalar(&self, scalar: &BigUint) -> bool {
        let candidate_point = self.table.scalar_multiply(scalar);
        self.curve().equals(&candidate_point, &self.public_key)
    }
}
