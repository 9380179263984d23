use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::{ConvertedType, PhysicalType};

/// Scale and precision of a `DECIMAL` column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecimalParams {
    /// Number of fractional digits.
    pub scale: i32,
    /// Maximum number of significant digits. Informational only.
    pub precision: i32,
}

/// Logical type of a column, resolved from its converted-type annotation.
///
/// Each variant carries only the parameters its decoder needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalType {
    Decimal(DecimalParams),
    Date,
    TimeMillis,
    TimeMicros,
    TimestampMillis,
    TimestampMicros,
    Utf8,
    Enum,
    Json,
    Bson,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Int8,
    Int16,
    Int32,
    Int64,
}

impl LogicalType {
    /// Maps a converted-type annotation to its logical type. `decimal` is used
    /// only for `DECIMAL`. Structural annotations have no logical type.
    pub fn from_converted_type(
        converted_type: ConvertedType,
        decimal: DecimalParams,
    ) -> Option<LogicalType> {
        let logical = match converted_type {
            ConvertedType::Decimal => LogicalType::Decimal(decimal),
            ConvertedType::Date => LogicalType::Date,
            ConvertedType::TimeMillis => LogicalType::TimeMillis,
            ConvertedType::TimeMicros => LogicalType::TimeMicros,
            ConvertedType::TimestampMillis => LogicalType::TimestampMillis,
            ConvertedType::TimestampMicros => LogicalType::TimestampMicros,
            ConvertedType::Utf8 => LogicalType::Utf8,
            ConvertedType::Enum => LogicalType::Enum,
            ConvertedType::Json => LogicalType::Json,
            ConvertedType::Bson => LogicalType::Bson,
            ConvertedType::Uint8 => LogicalType::UInt8,
            ConvertedType::Uint16 => LogicalType::UInt16,
            ConvertedType::Uint32 => LogicalType::UInt32,
            ConvertedType::Uint64 => LogicalType::UInt64,
            ConvertedType::Int8 => LogicalType::Int8,
            ConvertedType::Int16 => LogicalType::Int16,
            ConvertedType::Int32 => LogicalType::Int32,
            ConvertedType::Int64 => LogicalType::Int64,
            ConvertedType::Map
            | ConvertedType::MapKeyValue
            | ConvertedType::List
            | ConvertedType::Interval => return None,
        };
        Some(logical)
    }

    /// The converted-type annotation this logical type was resolved from.
    pub fn converted_type(&self) -> ConvertedType {
        match self {
            LogicalType::Decimal(_) => ConvertedType::Decimal,
            LogicalType::Date => ConvertedType::Date,
            LogicalType::TimeMillis => ConvertedType::TimeMillis,
            LogicalType::TimeMicros => ConvertedType::TimeMicros,
            LogicalType::TimestampMillis => ConvertedType::TimestampMillis,
            LogicalType::TimestampMicros => ConvertedType::TimestampMicros,
            LogicalType::Utf8 => ConvertedType::Utf8,
            LogicalType::Enum => ConvertedType::Enum,
            LogicalType::Json => ConvertedType::Json,
            LogicalType::Bson => ConvertedType::Bson,
            LogicalType::UInt8 => ConvertedType::Uint8,
            LogicalType::UInt16 => ConvertedType::Uint16,
            LogicalType::UInt32 => ConvertedType::Uint32,
            LogicalType::UInt64 => ConvertedType::Uint64,
            LogicalType::Int8 => ConvertedType::Int8,
            LogicalType::Int16 => ConvertedType::Int16,
            LogicalType::Int32 => ConvertedType::Int32,
            LogicalType::Int64 => ConvertedType::Int64,
        }
    }

    /// Physical types this logical type can be decoded from.
    pub fn source_types(&self) -> &'static [PhysicalType] {
        use PhysicalType::*;
        match self {
            LogicalType::Decimal(_) => &[Int32, Int64, FixedLenByteArray, ByteArray],
            LogicalType::Date
            | LogicalType::TimeMillis
            | LogicalType::UInt8
            | LogicalType::UInt16
            | LogicalType::UInt32
            | LogicalType::Int8
            | LogicalType::Int16
            | LogicalType::Int32 => &[Int32],
            LogicalType::TimeMicros
            | LogicalType::TimestampMillis
            | LogicalType::TimestampMicros
            | LogicalType::UInt64
            | LogicalType::Int64 => &[Int64],
            LogicalType::Utf8 | LogicalType::Enum | LogicalType::Json | LogicalType::Bson => {
                &[ByteArray]
            }
        }
    }

    /// Returns `true` if values of `physical_type` can be decoded as this type.
    pub fn accepts(&self, physical_type: PhysicalType) -> bool {
        self.source_types().contains(&physical_type)
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalType::Decimal(DecimalParams { scale, precision }) => {
                write!(f, "DECIMAL({precision}, {scale})")
            }
            other => fmt::Display::fmt(&other.converted_type(), f),
        }
    }
}
