//! Curves built from the constants in `keyscan-params`

use crate::ec::{Curve, Point};
use keyscan_api::Result;
use keyscan_params::NamedCurve;

/// Build a named curve together with its validated generator
pub fn curve_and_generator(named: &NamedCurve) -> Result<(Curve, Point)> {
    let curve = Curve::from_strs(named.p, named.a, named.b)?;
    let generator = curve.point_from_strs(named.gx, named.gy)?;
    Ok((curve, generator))
}

/// secp256k1 and its generator
pub fn secp256k1() -> Result<(Curve, Point)> {
    curve_and_generator(&keyscan_params::SECP256K1)
}

/// NIST P-256 and its generator
pub fn p256() -> Result<(Curve, Point)> {
    curve_and_generator(&keyscan_params::P256)
}

/// NIST P-384 and its generator
pub fn p384() -> Result<(Curve, Point)> {
    curve_and_generator(&keyscan_params::P384)
}
