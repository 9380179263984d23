use std::{fmt, str::FromStr};

use colconv_common::{Result, error::Error, verify_arg};
use serde::{Deserialize, Serialize};

use crate::logical_type::{DecimalParams, LogicalType};

/// Declares a closed enum carrying the format's numeric tags and canonical
/// upper-case names, with lookups in both directions.
macro_rules! tagged_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident = $id:literal => $text:literal,)+ }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum $name {
            $(#[doc = $text] $variant = $id,)+
        }

        impl $name {
            /// All variants, in tag order.
            pub const ENUM_VALUES: &'static [$name] = &[$($name::$variant,)+];

            /// Looks up a variant by its numeric tag.
            pub fn from_id(id: i32) -> Option<$name> {
                match id {
                    $($id => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Numeric tag of the variant as stored in file metadata.
            pub fn id(self) -> i32 {
                self as i32
            }

            /// Canonical upper-case name, e.g. `FIXED_LEN_BYTE_ARRAY` or `UINT_8`.
            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<$name> {
                let upper = s.trim().to_ascii_uppercase();
                match upper.as_str() {
                    $($text => Ok($name::$variant),)+
                    _ => Err(Error::invalid_arg(
                        stringify!($name),
                        format!("unknown name '{s}'"),
                    )),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(s: String) -> Result<$name> {
                s.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.name().to_string()
            }
        }
    };
}

tagged_enum! {
    /// Low-level storage encoding of a column's values.
    PhysicalType {
        Boolean = 0 => "BOOLEAN",
        Int32 = 1 => "INT32",
        Int64 = 2 => "INT64",
        Int96 = 3 => "INT96",
        Float = 4 => "FLOAT",
        Double = 5 => "DOUBLE",
        ByteArray = 6 => "BYTE_ARRAY",
        FixedLenByteArray = 7 => "FIXED_LEN_BYTE_ARRAY",
    }
}

tagged_enum! {
    /// Semantic interpretation layered on top of a physical type.
    ConvertedType {
        Utf8 = 0 => "UTF8",
        Map = 1 => "MAP",
        MapKeyValue = 2 => "MAP_KEY_VALUE",
        List = 3 => "LIST",
        Enum = 4 => "ENUM",
        Decimal = 5 => "DECIMAL",
        Date = 6 => "DATE",
        TimeMillis = 7 => "TIME_MILLIS",
        TimeMicros = 8 => "TIME_MICROS",
        TimestampMillis = 9 => "TIMESTAMP_MILLIS",
        TimestampMicros = 10 => "TIMESTAMP_MICROS",
        Uint8 = 11 => "UINT_8",
        Uint16 = 12 => "UINT_16",
        Uint32 = 13 => "UINT_32",
        Uint64 = 14 => "UINT_64",
        Int8 = 15 => "INT_8",
        Int16 = 16 => "INT_16",
        Int32 = 17 => "INT_32",
        Int64 = 18 => "INT_64",
        Json = 19 => "JSON",
        Bson = 20 => "BSON",
        Interval = 21 => "INTERVAL",
    }
}

impl PhysicalType {
    /// Returns `true` for the byte-string encodings.
    pub fn is_binary(self) -> bool {
        matches!(self, PhysicalType::ByteArray | PhysicalType::FixedLenByteArray)
    }
}

impl ConvertedType {
    /// Returns `true` for annotations that describe nested group structure (or
    /// an opaque interval) rather than a per-value decoding.
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            ConvertedType::Map
                | ConvertedType::MapKeyValue
                | ConvertedType::List
                | ConvertedType::Interval
        )
    }
}

/// Schema annotation of a single leaf column.
///
/// `scale` and `precision` are meaningful only for `DECIMAL`; `type_length` is
/// required only for `FIXED_LEN_BYTE_ARRAY`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaElement {
    pub name: String,
    pub physical_type: PhysicalType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converted_type: Option<ConvertedType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_length: Option<i32>,
}

impl SchemaElement {
    pub fn new(name: impl Into<String>, physical_type: PhysicalType) -> SchemaElement {
        SchemaElement {
            name: name.into(),
            physical_type,
            converted_type: None,
            scale: None,
            precision: None,
            type_length: None,
        }
    }

    pub fn with_converted_type(mut self, converted_type: ConvertedType) -> SchemaElement {
        self.converted_type = Some(converted_type);
        self
    }

    /// Sets the converted type from its numeric tag. Tags this crate does not
    /// know leave the column unannotated, so its values pass through untouched.
    pub fn with_converted_type_id(mut self, id: i32) -> SchemaElement {
        self.converted_type = ConvertedType::from_id(id);
        if self.converted_type.is_none() {
            log::debug!(
                "column '{}': unrecognized converted type tag {id}, treating as unannotated",
                self.name
            );
        }
        self
    }

    pub fn with_decimal(mut self, scale: i32, precision: i32) -> SchemaElement {
        self.converted_type = Some(ConvertedType::Decimal);
        self.scale = Some(scale);
        self.precision = Some(precision);
        self
    }

    pub fn with_type_length(mut self, type_length: i32) -> SchemaElement {
        self.type_length = Some(type_length);
        self
    }

    /// Checks the descriptor invariants: `0 <= scale <= precision` for decimals
    /// and a positive `type_length` for fixed-length byte arrays.
    pub fn validate(&self) -> Result<()> {
        if self.physical_type == PhysicalType::FixedLenByteArray {
            let type_length = self.type_length.ok_or_else(|| {
                Error::invalid_arg(
                    "type_length",
                    format!(
                        "column '{}': FIXED_LEN_BYTE_ARRAY requires a type length",
                        self.name
                    ),
                )
            })?;
            verify_arg!(type_length, type_length > 0);
        }
        if self.converted_type == Some(ConvertedType::Decimal) {
            let precision = self.precision.ok_or_else(|| {
                Error::invalid_arg(
                    "precision",
                    format!("column '{}': DECIMAL requires a precision", self.name),
                )
            })?;
            let scale = self.scale.unwrap_or(0);
            verify_arg!(precision, precision > 0);
            verify_arg!(scale, scale >= 0);
            verify_arg!(scale, scale <= precision);
        }
        Ok(())
    }

    /// Resolves the logical type of the column after validating the descriptor.
    ///
    /// Returns `None` when the column carries no converted type or only a
    /// structural annotation (`MAP`, `LIST`, `MAP_KEY_VALUE`, `INTERVAL`).
    pub fn logical_type(&self) -> Result<Option<LogicalType>> {
        self.validate()?;
        let Some(converted_type) = self.converted_type else {
            return Ok(None);
        };
        let params = DecimalParams {
            scale: self.scale.unwrap_or(0),
            precision: self.precision.unwrap_or_default(),
        };
        Ok(LogicalType::from_converted_type(converted_type, params))
    }
}
