//! Parsing arbitrary-precision integers from configuration strings
//!
//! Values follow the usual base-prefix convention: `0x` for hexadecimal,
//! `0b` for binary, a leading `0` for octal and plain digits for decimal,
//! with an optional sign in front.

use keyscan_api::{Error, Result};
use num_bigint::{BigInt, BigUint, Sign};

/// Parse a signed integer, detecting the radix from its prefix
pub fn parse_integer(input: &str) -> Result<BigInt> {
    let trimmed = input.trim();
    let (sign, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (Sign::Minus, rest),
        None => (Sign::Plus, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let magnitude = parse_magnitude(body)
        .ok_or_else(|| Error::param("integer", format!("cannot parse {:?}", input)))?;
    Ok(BigInt::from_biguint(sign, magnitude))
}

/// Parse a non-negative integer, detecting the radix from its prefix
pub fn parse_unsigned(input: &str) -> Result<BigUint> {
    let value = parse_integer(input)?;
    match value.sign() {
        Sign::Minus => Err(Error::param(
            "integer",
            format!("{:?} must not be negative", input),
        )),
        _ => Ok(value.magnitude().clone()),
    }
}

fn parse_magnitude(body: &str) -> Option<BigUint> {
    let (radix, digits) = if let Some(rest) = strip_prefix_ci(body, "0x") {
        (16, rest)
    } else if let Some(rest) = strip_prefix_ci(body, "0b") {
        (2, rest)
    } else if body.len() > 1 && body.starts_with('0') {
        (8, &body[1..])
    } else {
        (10, body)
    };

    // A second sign or stray separator after the prefix is not a number
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    BigUint::parse_bytes(digits.as_bytes(), radix)
}

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    match s.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => Some(&s[prefix.len()..]),
        _ => None,
    }
}
