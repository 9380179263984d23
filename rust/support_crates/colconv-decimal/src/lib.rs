//! Exact arbitrary-precision decimal numbers.
//!
//! A [`Decimal`] is an unscaled integer of unbounded magnitude together with a
//! base-10 scale: its value is `unscaled × 10^(−scale)`. Nothing in this crate
//! goes through floating point, so values decoded from storage compare and print
//! exactly as they were written.

mod decimal;

pub use decimal::{Decimal, ParseDecimalError};
