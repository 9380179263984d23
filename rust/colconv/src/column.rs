//! Column-level conversion.

use std::ops::Range;

use colconv_common::{Result, error::Error};
use colconv_format::SchemaElement;
use colconv_sequence::{DecodedColumn, LogicalValue, RawColumn};
use colconv_value_conversions::{
    bson_conversions, decimal_conversions, integer_conversions, json_conversions,
    temporal_conversions, text_conversions,
};
use rayon::prelude::*;

use crate::{
    dispatch::{self, Converter},
    options::ConversionOptions,
};

/// Number of rows converted by one parallel task.
const PARALLEL_CHUNK_ROWS: usize = 1024;

/// Converts a column using the default [`ConversionOptions`].
pub fn convert_column(raw: RawColumn, schema: &SchemaElement) -> Result<DecodedColumn> {
    convert_column_with_options(raw, schema, &ConversionOptions::default())
}

/// Converts every value of `raw` to the logical type declared by `schema`.
///
/// Columns without a per-value decoding are returned unchanged as
/// [`DecodedColumn::Raw`]. Otherwise the result holds exactly one value per
/// input row, in input order.
///
/// # Errors
/// Fails on the first value that cannot be decoded; the error carries that
/// value's row index. `UnsupportedConversion` is returned when the schema pair
/// has no converter or `raw` does not hold values of the schema's physical type.
pub fn convert_column_with_options(
    raw: RawColumn,
    schema: &SchemaElement,
    options: &ConversionOptions,
) -> Result<DecodedColumn> {
    let Some(converter) = prepare(&raw, schema, options)? else {
        return Ok(DecodedColumn::Raw(raw));
    };
    let values = convert_rows(converter, &raw, 0..raw.len())?;
    Ok(DecodedColumn::Values(values))
}

/// Same as [`convert_column_with_options`], but columns of at least
/// `options.parallel_threshold` rows are split into chunks converted on the
/// rayon pool.
///
/// The output and the reported error (the one at the lowest row index) are the
/// same as for sequential conversion.
pub fn convert_column_par(
    raw: RawColumn,
    schema: &SchemaElement,
    options: &ConversionOptions,
) -> Result<DecodedColumn> {
    let Some(converter) = prepare(&raw, schema, options)? else {
        return Ok(DecodedColumn::Raw(raw));
    };
    let len = raw.len();
    if len < options.parallel_threshold {
        return Ok(DecodedColumn::Values(convert_rows(converter, &raw, 0..len)?));
    }

    let chunks = (0..len.div_ceil(PARALLEL_CHUNK_ROWS))
        .into_par_iter()
        .map(|chunk| {
            let start = chunk * PARALLEL_CHUNK_ROWS;
            let rows = start..(start + PARALLEL_CHUNK_ROWS).min(len);
            log::trace!("column '{}': converting rows {rows:?}", schema.name);
            convert_rows(converter, &raw, rows)
        })
        .collect::<Vec<_>>();

    let mut values = Vec::with_capacity(len);
    for chunk in chunks {
        values.extend(chunk?);
    }
    Ok(DecodedColumn::Values(values))
}

fn prepare(
    raw: &RawColumn,
    schema: &SchemaElement,
    options: &ConversionOptions,
) -> Result<Option<Converter>> {
    let Some(converter) = dispatch::resolve(schema, options)? else {
        log::debug!(
            "column '{}': no converter for {}, passing {} values through",
            schema.name,
            schema
                .converted_type
                .map_or("no converted type", |converted| converted.name()),
            raw.len()
        );
        return Ok(None);
    };
    if !raw.matches(schema.physical_type) {
        return Err(Error::unsupported_conversion(
            converter.converted_type().name(),
            format!(
                "{} (column holds {} values)",
                schema.physical_type,
                raw.element_type()
            ),
        ));
    }
    Ok(Some(converter))
}

/// Converts the rows in `rows`, tagging a failure with its absolute row index.
fn convert_rows(
    converter: Converter,
    raw: &RawColumn,
    rows: Range<usize>,
) -> Result<Vec<LogicalValue>> {
    let offset = rows.start;
    match (converter, raw) {
        (Converter::Int32Decimal(params), RawColumn::Int32(values)) => {
            infallible(&values[rows], |&v| {
                decimal_conversions::int32_to_decimal(v, params.scale).into()
            })
        }
        (Converter::Int64Decimal(params), RawColumn::Int64(values)) => {
            infallible(&values[rows], |&v| {
                decimal_conversions::int64_to_decimal(v, params.scale).into()
            })
        }
        (Converter::BytesDecimal(params), RawColumn::Bytes(values)) => {
            fallible(&values[rows], offset, |v| {
                decimal_conversions::bytes_to_decimal(v, params.scale).map(Into::into)
            })
        }
        (
            Converter::FixedBytesDecimal {
                params,
                type_length,
            },
            RawColumn::Bytes(values),
        ) => fallible(&values[rows], offset, |v| {
            decimal_conversions::fixed_bytes_to_decimal(v, type_length, params.scale)
                .map(Into::into)
        }),
        (Converter::UnixDaysDate, RawColumn::Int32(values)) => {
            fallible(&values[rows], offset, |&v| {
                temporal_conversions::unix_days_to_date(v).map(Into::into)
            })
        }
        (Converter::OrdinalDate, RawColumn::Int32(values)) => {
            fallible(&values[rows], offset, |&v| {
                temporal_conversions::ordinal_to_date(v).map(Into::into)
            })
        }
        (Converter::TimeMillis, RawColumn::Int32(values)) => infallible(&values[rows], |&v| {
            temporal_conversions::millis_to_time_of_day(v).into()
        }),
        (Converter::TimeMicros, RawColumn::Int64(values)) => infallible(&values[rows], |&v| {
            temporal_conversions::micros_to_time_of_day(v).into()
        }),
        (Converter::TimestampMillis, RawColumn::Int64(values)) => {
            fallible(&values[rows], offset, |&v| {
                temporal_conversions::unix_millis_to_timestamp(v).map(Into::into)
            })
        }
        (Converter::TimestampMicros, RawColumn::Int64(values)) => {
            fallible(&values[rows], offset, |&v| {
                temporal_conversions::unix_micros_to_timestamp(v).map(Into::into)
            })
        }
        (Converter::Utf8, RawColumn::Bytes(values)) => fallible(&values[rows], offset, |v| {
            text_conversions::bytes_to_text(v, "UTF8").map(LogicalValue::Text)
        }),
        (Converter::Enum, RawColumn::Bytes(values)) => fallible(&values[rows], offset, |v| {
            text_conversions::bytes_to_text(v, "ENUM").map(LogicalValue::Text)
        }),
        (Converter::Json, RawColumn::Bytes(values)) => fallible(&values[rows], offset, |v| {
            json_conversions::bytes_to_json(v).map(Into::into)
        }),
        (Converter::Bson { max_depth }, RawColumn::Bytes(values)) => {
            fallible(&values[rows], offset, |v| {
                bson_conversions::bytes_to_bson(v, max_depth).map(Into::into)
            })
        }
        (Converter::UInt8, RawColumn::Int32(values)) => infallible(&values[rows], |&v| {
            integer_conversions::int32_to_uint8(v).into()
        }),
        (Converter::UInt16, RawColumn::Int32(values)) => infallible(&values[rows], |&v| {
            integer_conversions::int32_to_uint16(v).into()
        }),
        (Converter::UInt32, RawColumn::Int32(values)) => infallible(&values[rows], |&v| {
            integer_conversions::int32_to_uint32(v).into()
        }),
        (Converter::UInt64, RawColumn::Int64(values)) => infallible(&values[rows], |&v| {
            integer_conversions::int64_to_uint64(v).into()
        }),
        (Converter::Int8, RawColumn::Int32(values)) => infallible(&values[rows], |&v| {
            integer_conversions::int32_to_int8(v).into()
        }),
        (Converter::Int16, RawColumn::Int32(values)) => infallible(&values[rows], |&v| {
            integer_conversions::int32_to_int16(v).into()
        }),
        (Converter::Int32, RawColumn::Int32(values)) => infallible(&values[rows], |&v| {
            integer_conversions::int32_to_int32(v).into()
        }),
        (Converter::Int64, RawColumn::Int64(values)) => infallible(&values[rows], |&v| {
            integer_conversions::int64_to_int64(v).into()
        }),
        (converter, raw) => Err(Error::unsupported_conversion(
            converter.converted_type().name(),
            raw.element_type(),
        )),
    }
}

#[inline]
fn infallible<T>(values: &[T], f: impl Fn(&T) -> LogicalValue) -> Result<Vec<LogicalValue>> {
    Ok(values.iter().map(f).collect())
}

#[inline]
fn fallible<T>(
    values: &[T],
    offset: usize,
    f: impl Fn(&T) -> Result<LogicalValue>,
) -> Result<Vec<LogicalValue>> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| f(v).map_err(|e| e.at_row(offset + i)))
        .collect()
}
