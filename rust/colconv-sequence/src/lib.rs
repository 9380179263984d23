//! In-memory column representations consumed and produced by the decoders.
//!
//! - [`raw::RawColumn`]: physically decoded values (INT32, INT64 or byte strings).
//! - [`decoded::DecodedColumn`]: the result of a conversion, either the raw
//!   column passed through or a same-length sequence of [`value::LogicalValue`]s.
//! - [`document::DocumentValue`]: the tree produced by the JSON and BSON decoders.
//! - [`json_printer`]: rendering of decoded values as `serde_json::Value`.

pub mod decoded;
pub mod document;
pub mod json_printer;
pub mod raw;
pub mod value;

pub use decoded::DecodedColumn;
pub use document::DocumentValue;
pub use raw::RawColumn;
pub use value::LogicalValue;
