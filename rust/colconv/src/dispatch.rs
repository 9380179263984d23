//! Converter selection.
//!
//! A column's converter is chosen from its logical type and, for `DECIMAL`,
//! its physical type. The selected [`Converter`] holds every parameter the
//! per-value decoder needs, already adjusted for the [`ConversionOptions`].

use std::fmt;

use colconv_common::{Result, error::Error};
use colconv_format::{ConvertedType, DecimalParams, LogicalType, PhysicalType, SchemaElement};

use crate::options::ConversionOptions;

/// Per-column decoding strategy.
///
/// The `scale` of the decimal variants is the effective scale: under
/// [`Compatibility::Legacy`](crate::Compatibility::Legacy) it is one less than
/// the declared scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Converter {
    Int32Decimal(DecimalParams),
    Int64Decimal(DecimalParams),
    FixedBytesDecimal {
        params: DecimalParams,
        /// Required value length, when enforced.
        type_length: Option<usize>,
    },
    BytesDecimal(DecimalParams),
    /// Signed days since 1970-01-01.
    UnixDaysDate,
    /// Proleptic Gregorian ordinal, 0001-01-01 is day 1.
    OrdinalDate,
    TimeMillis,
    TimeMicros,
    TimestampMillis,
    TimestampMicros,
    Utf8,
    Enum,
    Json,
    Bson {
        max_depth: usize,
    },
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Int8,
    Int16,
    Int32,
    Int64,
}

impl Converter {
    /// The physical type whose values this converter consumes.
    pub fn source_type(&self) -> PhysicalType {
        match self {
            Converter::Int32Decimal(_)
            | Converter::UnixDaysDate
            | Converter::OrdinalDate
            | Converter::TimeMillis
            | Converter::UInt8
            | Converter::UInt16
            | Converter::UInt32
            | Converter::Int8
            | Converter::Int16
            | Converter::Int32 => PhysicalType::Int32,
            Converter::Int64Decimal(_)
            | Converter::TimeMicros
            | Converter::TimestampMillis
            | Converter::TimestampMicros
            | Converter::UInt64
            | Converter::Int64 => PhysicalType::Int64,
            Converter::FixedBytesDecimal { .. } => PhysicalType::FixedLenByteArray,
            Converter::BytesDecimal(_)
            | Converter::Utf8
            | Converter::Enum
            | Converter::Json
            | Converter::Bson { .. } => PhysicalType::ByteArray,
        }
    }

    /// The converted-type annotation this converter decodes.
    pub fn converted_type(&self) -> ConvertedType {
        match self {
            Converter::Int32Decimal(_)
            | Converter::Int64Decimal(_)
            | Converter::FixedBytesDecimal { .. }
            | Converter::BytesDecimal(_) => ConvertedType::Decimal,
            Converter::UnixDaysDate | Converter::OrdinalDate => ConvertedType::Date,
            Converter::TimeMillis => ConvertedType::TimeMillis,
            Converter::TimeMicros => ConvertedType::TimeMicros,
            Converter::TimestampMillis => ConvertedType::TimestampMillis,
            Converter::TimestampMicros => ConvertedType::TimestampMicros,
            Converter::Utf8 => ConvertedType::Utf8,
            Converter::Enum => ConvertedType::Enum,
            Converter::Json => ConvertedType::Json,
            Converter::Bson { .. } => ConvertedType::Bson,
            Converter::UInt8 => ConvertedType::Uint8,
            Converter::UInt16 => ConvertedType::Uint16,
            Converter::UInt32 => ConvertedType::Uint32,
            Converter::UInt64 => ConvertedType::Uint64,
            Converter::Int8 => ConvertedType::Int8,
            Converter::Int16 => ConvertedType::Int16,
            Converter::Int32 => ConvertedType::Int32,
            Converter::Int64 => ConvertedType::Int64,
        }
    }
}

impl fmt::Display for Converter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Converter::Int32Decimal(p)
            | Converter::Int64Decimal(p)
            | Converter::FixedBytesDecimal { params: p, .. }
            | Converter::BytesDecimal(p) => write!(
                f,
                "DECIMAL({}, {}) <- {}",
                p.precision,
                p.scale,
                self.source_type()
            ),
            Converter::OrdinalDate => write!(f, "DATE (ordinal) <- INT32"),
            other => write!(f, "{} <- {}", other.converted_type(), other.source_type()),
        }
    }
}

/// Selects the converter for a column.
///
/// Returns `Ok(None)` when the column has no converted type, or one without a
/// per-value decoding (`MAP`, `LIST`, `MAP_KEY_VALUE`, `INTERVAL`).
///
/// # Errors
/// `InvalidArgument` if the schema descriptor or the options are inconsistent,
/// and `UnsupportedConversion` if the converted type cannot be decoded from the
/// column's physical type.
pub fn resolve(schema: &SchemaElement, options: &ConversionOptions) -> Result<Option<Converter>> {
    options.validate()?;
    let Some(logical) = schema.logical_type()? else {
        return Ok(None);
    };
    let physical = schema.physical_type;
    if !logical.accepts(physical) {
        return Err(Error::unsupported_conversion(
            logical.converted_type().name(),
            physical.name(),
        ));
    }

    let converter = match logical {
        LogicalType::Decimal(params) => {
            let params = if options.is_legacy() {
                DecimalParams {
                    scale: params.scale - 1,
                    ..params
                }
            } else {
                params
            };
            match physical {
                PhysicalType::Int32 => Converter::Int32Decimal(params),
                PhysicalType::Int64 => Converter::Int64Decimal(params),
                PhysicalType::ByteArray => Converter::BytesDecimal(params),
                PhysicalType::FixedLenByteArray => Converter::FixedBytesDecimal {
                    params,
                    type_length: schema
                        .type_length
                        .filter(|_| options.strict_fixed_length)
                        .and_then(|len| usize::try_from(len).ok()),
                },
                other => {
                    return Err(Error::unsupported_conversion("DECIMAL", other.name()));
                }
            }
        }
        LogicalType::Date if options.is_legacy() => Converter::OrdinalDate,
        LogicalType::Date => Converter::UnixDaysDate,
        LogicalType::TimeMillis => Converter::TimeMillis,
        LogicalType::TimeMicros => Converter::TimeMicros,
        LogicalType::TimestampMillis => Converter::TimestampMillis,
        LogicalType::TimestampMicros => Converter::TimestampMicros,
        LogicalType::Utf8 => Converter::Utf8,
        LogicalType::Enum => Converter::Enum,
        LogicalType::Json => Converter::Json,
        LogicalType::Bson => Converter::Bson {
            max_depth: options.bson_max_depth,
        },
        LogicalType::UInt8 => Converter::UInt8,
        LogicalType::UInt16 => Converter::UInt16,
        LogicalType::UInt32 => Converter::UInt32,
        LogicalType::UInt64 => Converter::UInt64,
        LogicalType::Int8 => Converter::Int8,
        LogicalType::Int16 => Converter::Int16,
        LogicalType::Int32 => Converter::Int32,
        LogicalType::Int64 => Converter::Int64,
    };
    log::debug!(
        "column '{}': {} over {} decoded by {converter}",
        schema.name,
        logical,
        physical
    );
    Ok(Some(converter))
}

/// Every `(converted type, physical type)` pair with a registered converter,
/// in tag order.
pub fn supported_conversions() -> Vec<(ConvertedType, PhysicalType)> {
    let params = DecimalParams {
        scale: 0,
        precision: 1,
    };
    ConvertedType::ENUM_VALUES
        .iter()
        .filter_map(|&converted| LogicalType::from_converted_type(converted, params))
        .flat_map(|logical| {
            logical
                .source_types()
                .iter()
                .map(move |&physical| (logical.converted_type(), physical))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decimal(physical: PhysicalType, scale: i32, precision: i32) -> SchemaElement {
        SchemaElement::new("d", physical)
            .with_converted_type(ConvertedType::Decimal)
            .with_decimal(scale, precision)
    }

    #[test]
    fn test_decimal_by_physical_type() {
        let options = ConversionOptions::default();
        let params = DecimalParams {
            scale: 2,
            precision: 9,
        };
        assert_eq!(
            resolve(&decimal(PhysicalType::Int32, 2, 9), &options).unwrap(),
            Some(Converter::Int32Decimal(params))
        );
        assert_eq!(
            resolve(&decimal(PhysicalType::Int64, 2, 9), &options).unwrap(),
            Some(Converter::Int64Decimal(params))
        );
        assert_eq!(
            resolve(&decimal(PhysicalType::ByteArray, 2, 9), &options).unwrap(),
            Some(Converter::BytesDecimal(params))
        );
        assert_eq!(
            resolve(
                &decimal(PhysicalType::FixedLenByteArray, 2, 9).with_type_length(3),
                &options
            )
            .unwrap(),
            Some(Converter::FixedBytesDecimal {
                params,
                type_length: Some(3)
            })
        );
    }

    #[test]
    fn test_decimal_on_unsupported_physical_type() {
        for physical in [
            PhysicalType::Boolean,
            PhysicalType::Float,
            PhysicalType::Double,
            PhysicalType::Int96,
        ] {
            let err = resolve(&decimal(physical, 2, 9), &ConversionOptions::default()).unwrap_err();
            assert!(err.is_unsupported_conversion(), "{physical}: {err}");
        }
    }

    #[test]
    fn test_fixed_length_not_enforced_when_lenient() {
        let schema = decimal(PhysicalType::FixedLenByteArray, 2, 9).with_type_length(3);
        let options = ConversionOptions::default().with_strict_fixed_length(false);
        assert!(matches!(
            resolve(&schema, &options).unwrap(),
            Some(Converter::FixedBytesDecimal {
                type_length: None,
                ..
            })
        ));
    }

    #[test]
    fn test_legacy_adjustments() {
        let options = ConversionOptions::legacy();
        assert_eq!(
            resolve(&decimal(PhysicalType::Int64, 3, 13), &options).unwrap(),
            Some(Converter::Int64Decimal(DecimalParams {
                scale: 2,
                precision: 13
            }))
        );
        let date = SchemaElement::new("d", PhysicalType::Int32).with_converted_type(ConvertedType::Date);
        assert_eq!(resolve(&date, &options).unwrap(), Some(Converter::OrdinalDate));
        assert_eq!(
            resolve(&date, &ConversionOptions::default()).unwrap(),
            Some(Converter::UnixDaysDate)
        );
    }

    #[test]
    fn test_pass_through_types() {
        let options = ConversionOptions::default();
        let plain = SchemaElement::new("p", PhysicalType::Int32);
        assert_eq!(resolve(&plain, &options).unwrap(), None);
        for converted in [
            ConvertedType::Map,
            ConvertedType::MapKeyValue,
            ConvertedType::List,
            ConvertedType::Interval,
        ] {
            let schema = SchemaElement::new("s", PhysicalType::ByteArray).with_converted_type(converted);
            assert_eq!(resolve(&schema, &options).unwrap(), None);
        }
        let unknown = SchemaElement::new("u", PhysicalType::Int32).with_converted_type_id(99);
        assert_eq!(resolve(&unknown, &options).unwrap(), None);
    }

    #[test]
    fn test_width_mismatch_is_unsupported() {
        let options = ConversionOptions::default();
        let cases = [
            (ConvertedType::Date, PhysicalType::Int64),
            (ConvertedType::TimestampMillis, PhysicalType::Int32),
            (ConvertedType::Uint64, PhysicalType::Int32),
            (ConvertedType::Uint8, PhysicalType::Int64),
            (ConvertedType::Utf8, PhysicalType::Int32),
            (ConvertedType::Json, PhysicalType::FixedLenByteArray),
        ];
        for (converted, physical) in cases {
            let mut schema = SchemaElement::new("c", physical).with_converted_type(converted);
            if physical == PhysicalType::FixedLenByteArray {
                schema = schema.with_type_length(4);
            }
            let err = resolve(&schema, &options).unwrap_err();
            assert!(err.is_unsupported_conversion(), "{converted} over {physical}");
        }
    }

    #[test]
    fn test_invalid_schema_is_rejected() {
        let err = resolve(&decimal(PhysicalType::Int32, 5, 3), &ConversionOptions::default())
            .unwrap_err();
        assert!(matches!(
            err.kind(),
            colconv_common::error::ErrorKind::InvalidArgument { .. }
        ));
    }

    #[test]
    fn test_invalid_options_are_rejected() {
        let options = ConversionOptions::default().with_bson_max_depth(0);
        for schema in [
            SchemaElement::new("c", PhysicalType::ByteArray).with_converted_type(ConvertedType::Bson),
            SchemaElement::new("c", PhysicalType::Int32),
        ] {
            assert!(resolve(&schema, &options).unwrap_err().is_invalid_argument());
        }
    }

    #[test]
    fn test_supported_conversions() {
        let table = supported_conversions();
        assert!(table.contains(&(ConvertedType::Decimal, PhysicalType::FixedLenByteArray)));
        assert!(table.contains(&(ConvertedType::Uint64, PhysicalType::Int64)));
        assert!(table.contains(&(ConvertedType::Bson, PhysicalType::ByteArray)));
        assert!(!table.contains(&(ConvertedType::Date, PhysicalType::Int64)));
        assert!(table.iter().all(|(converted, _)| !converted.is_structural()));
        assert_eq!(
            table
                .iter()
                .filter(|(converted, _)| *converted == ConvertedType::Decimal)
                .count(),
            4
        );
    }

    #[test]
    fn test_source_type_matches_resolution() {
        let options = ConversionOptions::default();
        for (converted, physical) in supported_conversions() {
            let mut schema = SchemaElement::new("c", physical)
                .with_converted_type(converted)
                .with_decimal(1, 4);
            if physical == PhysicalType::FixedLenByteArray {
                schema = schema.with_type_length(4);
            }
            let converter = resolve(&schema, &options).unwrap().unwrap();
            assert_eq!(converter.source_type(), physical);
            assert_eq!(converter.converted_type(), converted);
        }
    }
}
