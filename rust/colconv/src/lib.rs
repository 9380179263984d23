//! Logical-type decoding of columnar data.
//!
//! Given a column's physically decoded values ([`RawColumn`]) and its schema
//! annotation ([`SchemaElement`]), [`convert_column`] produces the values of the
//! column's converted type: exact decimals, dates, times of day, timestamps,
//! text, reinterpreted integers and parsed JSON/BSON documents.
//!
//! ```
//! use colconv::{ConvertedType, PhysicalType, RawColumn, SchemaElement, convert_column};
//!
//! let schema = SchemaElement::new("price", PhysicalType::Int64)
//!     .with_converted_type(ConvertedType::Decimal)
//!     .with_decimal(2, 18);
//! let decoded = convert_column(RawColumn::from(vec![12345i64]), &schema).unwrap();
//! assert_eq!(decoded.value(0).unwrap().as_decimal().unwrap().to_string(), "123.45");
//! ```

pub mod column;
pub mod dispatch;
pub mod options;

pub use colconv_common::{Result, error::Error, error::ErrorKind};
pub use colconv_decimal::Decimal;
pub use colconv_format::{ConvertedType, DecimalParams, LogicalType, PhysicalType, SchemaElement};
pub use colconv_sequence::{DecodedColumn, DocumentValue, LogicalValue, RawColumn};
pub use column::{convert_column, convert_column_par, convert_column_with_options};
pub use dispatch::Converter;
pub use options::{Compatibility, ConversionOptions};
