//! Short Weierstrass curve parameters in hexadecimal string form

/// Domain parameters of a named curve: y² = x³ + a·x + b over F_p
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NamedCurve {
    /// Curve name as used in configuration files
    pub name: &'static str,
    /// Field prime
    pub p: &'static str,
    /// The 'a' coefficient
    pub a: &'static str,
    /// The 'b' coefficient
    pub b: &'static str,
    /// Generator x-coordinate
    pub gx: &'static str,
    /// Generator y-coordinate
    pub gy: &'static str,
}

/// secp256k1 (SEC 2)
pub const SECP256K1: NamedCurve = NamedCurve {
    name: "secp256k1",
    p: "0xfffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
    a: "0",
    b: "7",
    gx: "0x79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
    gy: "0x483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
};

/// NIST P-256 (secp256r1)
pub const P256: NamedCurve = NamedCurve {
    name: "P-256",
    p: "0xffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
    a: "0xffffffff00000001000000000000000000000000fffffffffffffffffffffffc",
    b: "0x5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b",
    gx: "0x6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296",
    gy: "0x4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5",
};

/// NIST P-384 (secp384r1)
pub const P384: NamedCurve = NamedCurve {
    name: "P-384",
    p: "0xfffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffeffffffff0000000000000000ffffffff",
    a: "0xfffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffeffffffff0000000000000000fffffffc",
    b: "0xb3312fa7e23ee7e4988e056be3f82d19181d9c6efe8141120314088f5013875ac656398d8a2ed19d2a85c8edd3ec2aef",
    gx: "0xaa87ca22be8b05378eb1c71ef320ad746e1d3b628ba79b9859f741e082542a385502f25dbf55296c3a545e3872760ab7",
    gy: "0x3617de4a96262c6f5d9e98bf9292dc29f8f41dbd289a147ce9da3113b5f0b8c00a60b1ce1d7e819d7a431d7c90ea0e5f",
};

/// All curves known by name
pub const ALL: [NamedCurve; 3] = [SECP256K1, P256, P384];

/// Look a curve up by name, ignoring ASCII case
pub fn by_name(name: &str) -> Option<NamedCurve> {
    ALL.iter()
        .copied()
        .find(|c| c.name.eq_ignore_ascii_case(name))
}
