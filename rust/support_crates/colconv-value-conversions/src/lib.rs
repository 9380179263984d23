//! Per-value decoders for converted (logical) types.
//!
//! Every function here is a pure conversion of one physical value into one
//! logical value. Column-level dispatch, option handling and error row tagging
//! live in the `colconv` crate.

pub mod bson_conversions;
pub mod decimal_conversions;
pub mod integer_conversions;
pub mod json_conversions;
pub mod temporal_conversions;
pub mod text_conversions;
