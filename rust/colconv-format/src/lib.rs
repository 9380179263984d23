//! Schema descriptors for columnar logical-type decoding.
//!
//! A [`schema::SchemaElement`] names a column's physical storage type and the
//! optional converted (logical) type layered on top of it. [`logical_type`]
//! resolves that pair into a closed [`logical_type::LogicalType`] variant that
//! holds only the parameters its decoder needs.

pub mod logical_type;
pub mod schema;

#[cfg(test)]
mod tests;

pub use logical_type::{DecimalParams, LogicalType};
pub use schema::{ConvertedType, PhysicalType, SchemaElement};
