//! Decimal conversion utilities for `DECIMAL` columns.
//!
//! The stored integer (native or big-endian two's-complement bytes) is the
//! unscaled value; the decoded number is `unscaled × 10^(−scale)`, held exactly
//! in a [`Decimal`].

use colconv_common::{Result, error::Error};
use colconv_decimal::Decimal;

/// Converts an INT32 unscaled value to a decimal with `scale` fractional digits.
#[inline]
pub fn int32_to_decimal(value: i32, scale: i32) -> Decimal {
    Decimal::new(value, scale)
}

/// Converts an INT64 unscaled value to a decimal with `scale` fractional digits.
#[inline]
pub fn int64_to_decimal(value: i64, scale: i32) -> Decimal {
    Decimal::new(value, scale)
}

/// Converts a big-endian two's-complement byte string of any length to a decimal.
///
/// # Errors
/// Returns `InvalidInput` for an empty byte string.
pub fn bytes_to_decimal(bytes: &[u8], scale: i32) -> Result<Decimal> {
    Decimal::from_signed_bytes_be(bytes, scale)
        .ok_or_else(|| Error::invalid_input("DECIMAL", "empty byte string"))
}

/// Converts a `FIXED_LEN_BYTE_ARRAY` value to a decimal.
///
/// When `type_length` is given, the value must be exactly that many bytes long.
pub fn fixed_bytes_to_decimal(
    bytes: &[u8],
    type_length: Option<usize>,
    scale: i32,
) -> Result<Decimal> {
    if let Some(expected) = type_length {
        if bytes.len() != expected {
            return Err(Error::invalid_input(
                "DECIMAL",
                format!(
                    "fixed-length value has {} bytes, expected {expected}",
                    bytes.len()
                ),
            ));
        }
    }
    bytes_to_decimal(bytes, scale)
}
