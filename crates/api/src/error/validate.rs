//! Validation utilities for configuration values

use super::{Error, Result};

/// Validate a parameter condition
#[inline(always)]
pub fn parameter(condition: bool, context: &'static str, reason: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::param(context, reason));
    }
    Ok(())
}

/// Validate that a derived key size fits the window capacity
#[inline(always)]
pub fn key_size(actual: usize, max: usize) -> Result<()> {
    if actual > max {
        return Err(Error::KeyTooLarge { actual, max });
    }
    Ok(())
}

/// Turn an optional field into a `MissingParameter` error
#[inline(always)]
pub fn required<T>(value: Option<T>, field: &'static str) -> Result<T> {
    value.ok_or(Error::MissingParameter { field })
}
