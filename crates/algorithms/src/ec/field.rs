//! Arithmetic modulo the field prime

use keyscan_api::{validate, Result};
use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

/// The prime field F_p
///
/// Every method expects its operands already reduced into `[0, p)` and
/// returns a reduced value, so intermediate results never grow past p².
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimeField {
    p: BigUint,
    bits: usize,
}

impl PrimeField {
    /// Create a field from its modulus
    ///
    /// Primality is not tested here. A composite modulus makes some inversion
    /// fail, which `PrecomputedTable::try_build` reports as an error.
    pub fn new(p: BigUint) -> Result<Self> {
        validate::parameter(p >= BigUint::from(3u32), "curve modulus", "p must be at least 3")?;
        let bits = p.bits() as usize;
        Ok(Self { p, bits })
    }

    /// The modulus
    pub fn modulus(&self) -> &BigUint {
        &self.p
    }

    /// Number of bits in the modulus
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Number of bytes needed to hold any field element
    pub fn size_bytes(&self) -> usize {
        (self.bits + 7) / 8
    }

    /// Reduce an unsigned integer into the field
    pub fn reduce(&self, v: &BigUint) -> BigUint {
        v % &self.p
    }

    /// Reduce a possibly negative integer into the field
    pub fn reduce_signed(&self, v: &BigInt) -> BigUint {
        let p = BigInt::from(self.p.clone());
        let r = ((v % &p) + &p) % &p;
        r.magnitude().clone()
    }

    /// a + b
    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let sum = a + b;
        if sum >= self.p {
            sum - &self.p
        } else {
            sum
        }
    }

    /// a - b
    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        if a >= b {
            a - b
        } else {
            a + &self.p - b
        }
    }

    /// -a
    pub fn neg(&self, a: &BigUint) -> BigUint {
        if a.is_zero() {
            BigUint::zero()
        } else {
            &self.p - a
        }
    }

    /// a · b
    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.p
    }

    /// a · k for a small constant k
    pub fn mul_small(&self, a: &BigUint, k: u32) -> BigUint {
        (a * k) % &self.p
    }

    /// a²
    pub fn square(&self, a: &BigUint) -> BigUint {
        self.mul(a, a)
    }

    /// a⁻¹, or `None` for zero
    ///
    /// Uses Fermat's little theorem, so it is only correct for a prime modulus.
    pub fn invert(&self, a: &BigUint) -> Option<BigUint> {
        if a.is_zero() {
            return None;
        }
        let exp = &self.p - BigUint::from(2u32);
        let inv = a.modpow(&exp, &self.p);
        if self.mul(a, &inv).is_one() {
            Some(inv)
        } else {
            None
        }
    }
}
