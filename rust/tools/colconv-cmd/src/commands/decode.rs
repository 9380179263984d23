//! Decode command implementation

use anyhow::{Context, Result, bail};
use colconv::{
    Compatibility, ConversionOptions, ConvertedType, PhysicalType, RawColumn, SchemaElement,
};
use colconv_sequence::json_printer::ToJson;
use std::fs;

pub struct DecodeArgs {
    pub physical: String,
    pub converted: Option<String>,
    pub scale: Option<i32>,
    pub precision: Option<i32>,
    pub type_length: Option<i32>,
    pub legacy: bool,
    pub options: Option<String>,
    pub parallel: bool,
    pub values: Vec<String>,
}

pub fn run(args: DecodeArgs) -> Result<()> {
    let schema = build_schema(&args)?;
    let options = load_options(args.options.as_deref(), args.legacy)?;
    let raw = parse_values(schema.physical_type, &args.values)?;
    log::debug!("decoding {} {} values", raw.len(), raw.element_type());

    let decoded = if args.parallel {
        colconv::convert_column_par(raw, &schema, &options)
    } else {
        colconv::convert_column_with_options(raw, &schema, &options)
    }
    .with_context(|| format!("Failed to decode column as {}", describe(&schema)))?;

    let output = serde_json::to_string_pretty(&decoded.to_json())
        .context("Failed to serialize decoded values")?;
    println!("{output}");
    Ok(())
}

fn build_schema(args: &DecodeArgs) -> Result<SchemaElement> {
    let physical: PhysicalType = args
        .physical
        .parse()
        .with_context(|| format!("Invalid physical type: {}", args.physical))?;
    let mut schema = SchemaElement::new("value", physical);
    if let Some(converted) = &args.converted {
        let converted: ConvertedType = converted
            .parse()
            .with_context(|| format!("Invalid converted type: {converted}"))?;
        schema = schema.with_converted_type(converted);
    }
    schema.scale = args.scale;
    schema.precision = args.precision;
    schema.type_length = args.type_length;
    Ok(schema)
}

fn load_options(path: Option<&str>, legacy: bool) -> Result<ConversionOptions> {
    let options = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read options file: {path}"))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Invalid options file: {path}"))?
        }
        None => ConversionOptions::default(),
    };
    Ok(if legacy {
        options.with_compatibility(Compatibility::Legacy)
    } else {
        options
    })
}

fn parse_values(physical: PhysicalType, values: &[String]) -> Result<RawColumn> {
    let raw = match physical {
        PhysicalType::Int32 => RawColumn::Int32(
            values
                .iter()
                .map(|v| v.parse().with_context(|| format!("Invalid INT32 value: {v}")))
                .collect::<Result<_>>()?,
        ),
        PhysicalType::Int64 => RawColumn::Int64(
            values
                .iter()
                .map(|v| v.parse().with_context(|| format!("Invalid INT64 value: {v}")))
                .collect::<Result<_>>()?,
        ),
        PhysicalType::ByteArray | PhysicalType::FixedLenByteArray => RawColumn::Bytes(
            values
                .iter()
                .map(|v| {
                    let digits = v.strip_prefix("0x").unwrap_or(v);
                    hex::decode(digits).with_context(|| format!("Invalid hex value: {v}"))
                })
                .collect::<Result<_>>()?,
        ),
        other => bail!("Physical type {other} has no textual value form"),
    };
    Ok(raw)
}

fn describe(schema: &SchemaElement) -> String {
    match schema.converted_type {
        Some(converted) => format!("{converted} over {}", schema.physical_type),
        None => schema.physical_type.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(physical: &str, converted: Option<&str>, values: &[&str]) -> DecodeArgs {
        DecodeArgs {
            physical: physical.to_string(),
            converted: converted.map(str::to_string),
            scale: None,
            precision: None,
            type_length: None,
            legacy: false,
            options: None,
            parallel: false,
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    #[test]
    fn test_build_schema() {
        let mut a = args("fixed_len_byte_array", Some("decimal"), &["020001"]);
        a.scale = Some(2);
        a.precision = Some(7);
        a.type_length = Some(3);
        let schema = build_schema(&a).unwrap();
        assert_eq!(schema.physical_type, PhysicalType::FixedLenByteArray);
        assert_eq!(schema.converted_type, Some(ConvertedType::Decimal));
        assert_eq!(schema.type_length, Some(3));

        assert!(build_schema(&args("INT33", None, &["1"])).is_err());
        assert!(build_schema(&args("INT32", Some("NOPE"), &["1"])).is_err());
    }

    #[test]
    fn test_parse_values() {
        let values = ["-3".to_string(), "7".to_string()];
        assert_eq!(
            parse_values(PhysicalType::Int32, &values).unwrap(),
            RawColumn::Int32(vec![-3, 7])
        );
        assert_eq!(
            parse_values(PhysicalType::ByteArray, &["0x0200".to_string(), "ff".to_string()])
                .unwrap(),
            RawColumn::Bytes(vec![vec![0x02, 0x00], vec![0xff]])
        );
        assert!(parse_values(PhysicalType::Int32, &["9876543210".to_string()]).is_err());
        assert!(parse_values(PhysicalType::ByteArray, &["zz".to_string()]).is_err());
        assert!(parse_values(PhysicalType::Double, &["1.0".to_string()]).is_err());
    }

    #[test]
    fn test_decode_to_json() {
        let mut a = args("INT32", Some("DATE"), &["731888"]);
        a.legacy = true;
        let schema = build_schema(&a).unwrap();
        let options = load_options(None, a.legacy).unwrap();
        let raw = parse_values(schema.physical_type, &a.values).unwrap();
        let decoded = colconv::convert_column_with_options(raw, &schema, &options).unwrap();
        assert_eq!(decoded.to_json(), serde_json::json!(["2004-11-03"]));
    }
}
