//! Group law on a short Weierstrass curve in Jacobian coordinates

use crate::bigint::parse_integer;
use crate::ec::field::PrimeField;
use crate::ec::point::Point;
use keyscan_api::{Error, Result, ResultExt};
use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

/// The curve y² = x³ + a·x + b over F_p
///
/// Parameters are fixed once the curve is built. The coefficients are stored
/// reduced into the field, so a negative `a` such as P-256's -3 is held as
/// p - 3.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Curve {
    field: PrimeField,
    a: BigUint,
    b: BigUint,
}

impl Curve {
    /// Create a curve from its modulus and coefficients
    pub fn new(p: BigUint, a: &BigInt, b: &BigInt) -> Result<Self> {
        let field = PrimeField::new(p)?;
        let a = field.reduce_signed(a);
        let b = field.reduce_signed(b);
        Ok(Self { field, a, b })
    }

    /// Create a curve from string-form parameters (see [`crate::bigint`])
    pub fn from_strs(p: &str, a: &str, b: &str) -> Result<Self> {
        let p = parse_integer(p).with_context("curve modulus p")?;
        let p = match p.to_biguint() {
            Some(p) => p,
            None => return Err(Error::param("curve modulus p", "must not be negative")),
        };
        let a = parse_integer(a).with_context("curve coefficient a")?;
        let b = parse_integer(b).with_context("curve coefficient b")?;
        Self::new(p, &a, &b)
    }

    /// The underlying field
    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    /// The reduced 'a' coefficient
    pub fn a(&self) -> &BigUint {
        &self.a
    }

    /// The reduced 'b' coefficient
    pub fn b(&self) -> &BigUint {
        &self.b
    }

    /// Build a validated affine point from integer coordinates
    ///
    /// Coordinates are reduced modulo p first. Returns an error when the
    /// result is not on the curve.
    pub fn point(&self, x: &BigInt, y: &BigInt) -> Result<Point> {
        let p = Point::from_affine(self.field.reduce_signed(x), self.field.reduce_signed(y));
        if !self.check(&p) {
            return Err(Error::param(
                "curve point",
                "coordinates do not satisfy the curve equation",
            ));
        }
        Ok(p)
    }

    /// Build a validated affine point from string-form coordinates
    pub fn point_from_strs(&self, x: &str, y: &str) -> Result<Point> {
        let x = parse_integer(x).with_context("point x-coordinate")?;
        let y = parse_integer(y).with_context("point y-coordinate")?;
        self.point(&x, &y)
    }

    /// Check that `p` is the identity or satisfies
    /// y² = x³ + a·x·z⁴ + b·z⁶ (mod p)
    ///
    /// The all-zero triple is not a point. This is an internal consistency
    /// gate, used in assertions around the other operations.
    pub fn check(&self, p: &Point) -> bool {
        let f = &self.field;
        if p.x.is_zero() && p.y.is_zero() && p.z.is_zero() {
            return false;
        }

        let lhs = f.square(&p.y);
        let x3 = f.mul(&f.square(&p.x), &p.x);
        let z2 = f.square(&p.z);
        let z4 = f.square(&z2);
        let z6 = f.mul(&z4, &z2);
        let axz4 = f.mul(&f.mul(&self.a, &p.x), &z4);
        let bz6 = f.mul(&self.b, &z6);
        let rhs = f.add(&f.add(&x3, &axz4), &bz6);
        lhs == rhs
    }

    /// Convert `p` to the equivalent point with z = 1
    ///
    /// The identity is returned unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `p` fails [`Curve::check`] or its z has no inverse; either
    /// means the arithmetic itself is broken.
    pub fn normalize(&self, p: &Point) -> Point {
        match self.try_normalize(p) {
            Some(out) => out,
            None => panic!("normalize: z has no inverse modulo p"),
        }
    }

    /// Like [`Curve::normalize`], but `None` when z is not invertible
    ///
    /// That can only happen for a composite modulus, so callers building
    /// from untrusted parameters use this to reject them.
    ///
    /// # Panics
    ///
    /// Panics if `p` fails [`Curve::check`].
    pub fn try_normalize(&self, p: &Point) -> Option<Point> {
        assert!(self.check(p), "normalize: point is not on the curve");
        if p.is_identity() {
            return Some(Point::identity());
        }

        let f = &self.field;
        let z_inv = f.invert(&p.z)?;
        let z_inv2 = f.square(&z_inv);
        let z_inv3 = f.mul(&z_inv2, &z_inv);
        let out = Point::from_affine(f.mul(&p.x, &z_inv2), f.mul(&p.y, &z_inv3));
        debug_assert!(self.check(&out));
        Some(out)
    }

    /// Decide group-element equality without normalizing
    ///
    /// Cross-multiplies: x₁·z₂² = x₂·z₁² and y₁·z₂³ = y₂·z₁³. The identity
    /// compares equal only to another identity since its x is nonzero.
    pub fn equals(&self, p1: &Point, p2: &Point) -> bool {
        debug_assert!(self.check(p1));
        debug_assert!(self.check(p2));

        let f = &self.field;
        let z1_2 = f.square(&p1.z);
        let z2_2 = f.square(&p2.z);
        if f.mul(&z1_2, &p2.x) != f.mul(&z2_2, &p1.x) {
            return false;
        }

        let z1_3 = f.mul(&z1_2, &p1.z);
        let z2_3 = f.mul(&z2_2, &p2.z);
        f.mul(&z1_3, &p2.y) == f.mul(&z2_3, &p1.y)
    }

    /// Point doubling with the general-`a` Jacobian formulas
    ///
    /// C = 3x² + a·z⁴, A = 4x·y², B = 8y⁴, D = C² − 2A gives
    /// (D : (A − D)·C − B : 2y·z). The result is not normalized.
    pub fn double(&self, p: &Point) -> Point {
        debug_assert!(self.check(p));
        if p.is_identity() || p.y.is_zero() {
            return Point::identity();
        }

        let f = &self.field;
        let z2 = f.square(&p.z);
        let az4 = f.mul(&self.a, &f.square(&z2));
        let c = f.add(&f.mul_small(&f.square(&p.x), 3), &az4);

        let y2 = f.square(&p.y);
        let b = f.mul_small(&f.square(&y2), 8);
        let a = f.mul(&f.mul_small(&p.x, 4), &y2);

        let d = f.sub(&f.square(&c), &f.add(&a, &a));
        let y3 = f.sub(&f.mul(&f.sub(&a, &d), &c), &b);
        let z3 = f.mul(&f.mul_small(&p.y, 2), &p.z);

        let out = Point::from_jacobian(d, y3, z3);
        debug_assert!(self.check(&out));
        out
    }

    /// Mixed addition p1 + p2 where p2 is affine
    ///
    /// With A = x₂·z₁², B = y₂·z₁³, C = A − x₁, D = B − y₁ the sum is
    /// (D² − C³ − 2x₁C² : (x₁C² − x₃)·D − y₁C³ : z₁·C). Equal inputs fall
    /// through to [`Curve::double`]; opposite inputs give the identity.
    ///
    /// # Panics
    ///
    /// Panics if `p2` is neither affine nor the identity. Passing a
    /// projective second operand is a caller bug, not a runtime condition.
    pub fn add(&self, p1: &Point, p2: &Point) -> Point {
        assert!(
            p2.is_affine() || p2.is_identity(),
            "add: second operand must be affine (z = 1)"
        );
        debug_assert!(self.check(p1));
        debug_assert!(self.check(p2));

        if p1.is_identity() {
            return p2.clone();
        }
        if p2.is_identity() {
            return p1.clone();
        }

        let f = &self.field;
        let z1_2 = f.square(&p1.z);
        let z1_3 = f.mul(&z1_2, &p1.z);
        let u2 = f.mul(&p2.x, &z1_2);
        let s2 = f.mul(&p2.y, &z1_3);

        let c = f.sub(&u2, &p1.x);
        let d = f.sub(&s2, &p1.y);
        if c.is_zero() {
            if d.is_zero() {
                return self.double(p1);
            }
            return Point::identity();
        }

        let c2 = f.square(&c);
        let c3 = f.mul(&c2, &c);
        let x1c2 = f.mul(&p1.x, &c2);

        let x3 = f.sub(&f.sub(&f.square(&d), &c3), &f.add(&x1c2, &x1c2));
        let y3 = f.sub(&f.mul(&f.sub(&x1c2, &x3), &d), &f.mul(&p1.y, &c3));
        let z3 = f.mul(&p1.z, &c);

        let out = Point::from_jacobian(x3, y3, z3);
        debug_assert!(self.check(&out));
        out
    }

    /// The inverse element -p
    pub fn negate(&self, p: &Point) -> Point {
        if p.is_identity() {
            return Point::identity();
        }
        Point::from_jacobian(p.x.clone(), self.field.neg(&p.y), p.z.clone())
    }

    /// Re-express `p` with a different Jacobian representative
    ///
    /// (x : y : z) ↦ (λ²x : λ³y : λz) for nonzero λ. The group element is
    /// unchanged.
    pub fn rescale(&self, p: &Point, lambda: &BigUint) -> Point {
        let f = &self.field;
        let lambda = f.reduce(lambda);
        assert!(!lambda.is_zero(), "rescale: lambda must be nonzero");
        let l2 = f.square(&lambda);
        let l3 = f.mul(&l2, &lambda);
        Point::from_jacobian(f.mul(&p.x, &l2), f.mul(&p.y, &l3), f.mul(&p.z, &lambda))
    }

    /// Check whether `p` is in affine form or the identity
    pub fn is_normalized(&self, p: &Point) -> bool {
        p.z.is_one() || p.is_identity()
    }
}
