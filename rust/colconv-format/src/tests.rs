use crate::{ConvertedType, DecimalParams, LogicalType, PhysicalType, SchemaElement};

#[test]
fn test_enum_tags_round_trip() {
    for value in PhysicalType::ENUM_VALUES {
        assert_eq!(PhysicalType::from_id(value.id()), Some(*value));
        assert_eq!(value.name().parse::<PhysicalType>().unwrap(), *value);
    }
    for value in ConvertedType::ENUM_VALUES {
        assert_eq!(ConvertedType::from_id(value.id()), Some(*value));
        assert_eq!(value.name().parse::<ConvertedType>().unwrap(), *value);
    }
    assert_eq!(ConvertedType::from_id(22), None);
    assert_eq!(ConvertedType::from_id(-1), None);
    assert_eq!(PhysicalType::from_id(8), None);
}

#[test]
fn test_names() {
    assert_eq!(ConvertedType::Uint8.to_string(), "UINT_8");
    assert_eq!(ConvertedType::TimestampMillis.id(), 9);
    assert_eq!(
        PhysicalType::FixedLenByteArray.to_string(),
        "FIXED_LEN_BYTE_ARRAY"
    );
    assert_eq!("int64".parse::<PhysicalType>().unwrap(), PhysicalType::Int64);
    assert!("INT128".parse::<PhysicalType>().is_err());
}

#[test]
fn test_decimal_logical_type() {
    let schema = SchemaElement::new("price", PhysicalType::Int64).with_decimal(3, 13);
    assert_eq!(
        schema.logical_type().unwrap(),
        Some(LogicalType::Decimal(DecimalParams {
            scale: 3,
            precision: 13
        }))
    );
    assert_eq!(
        schema.logical_type().unwrap().unwrap().to_string(),
        "DECIMAL(13, 3)"
    );
}

#[test]
fn test_decimal_scale_defaults_to_zero() {
    let mut schema = SchemaElement::new("qty", PhysicalType::Int32)
        .with_converted_type(ConvertedType::Decimal);
    schema.precision = Some(9);
    assert_eq!(
        schema.logical_type().unwrap(),
        Some(LogicalType::Decimal(DecimalParams {
            scale: 0,
            precision: 9
        }))
    );
}

#[test]
fn test_invalid_decimal_schema() {
    let missing_precision = SchemaElement::new("d", PhysicalType::Int32)
        .with_converted_type(ConvertedType::Decimal);
    assert!(missing_precision.logical_type().is_err());

    let scale_too_large = SchemaElement::new("d", PhysicalType::Int32).with_decimal(10, 9);
    let err = scale_too_large.validate().unwrap_err();
    assert_eq!(err.to_string(), "invalid argument scale: scale <= precision");

    let negative_scale = SchemaElement::new("d", PhysicalType::Int32).with_decimal(-1, 9);
    assert!(negative_scale.validate().is_err());
}

#[test]
fn test_fixed_len_requires_type_length() {
    let schema = SchemaElement::new("f", PhysicalType::FixedLenByteArray).with_decimal(3, 13);
    assert!(schema.validate().is_err());
    assert!(schema.clone().with_type_length(0).validate().is_err());
    assert!(schema.with_type_length(3).validate().is_ok());
}

#[test]
fn test_structural_and_absent_types_resolve_to_none() {
    let plain = SchemaElement::new("raw", PhysicalType::Int32);
    assert_eq!(plain.logical_type().unwrap(), None);

    for converted in [
        ConvertedType::List,
        ConvertedType::Map,
        ConvertedType::MapKeyValue,
        ConvertedType::Interval,
    ] {
        assert!(converted.is_structural());
        let schema = SchemaElement::new("g", PhysicalType::ByteArray).with_converted_type(converted);
        assert_eq!(schema.logical_type().unwrap(), None);
    }
}

#[test]
fn test_unknown_converted_type_id() {
    let schema = SchemaElement::new("x", PhysicalType::Int32).with_converted_type_id(99);
    assert_eq!(schema.converted_type, None);
    let schema = SchemaElement::new("x", PhysicalType::Int32).with_converted_type_id(6);
    assert_eq!(schema.converted_type, Some(ConvertedType::Date));
}

#[test]
fn test_source_types() {
    assert!(LogicalType::Date.accepts(PhysicalType::Int32));
    assert!(!LogicalType::Date.accepts(PhysicalType::Int64));
    assert!(LogicalType::UInt64.accepts(PhysicalType::Int64));
    assert!(!LogicalType::Json.accepts(PhysicalType::FixedLenByteArray));
    let decimal = LogicalType::Decimal(DecimalParams {
        scale: 0,
        precision: 1,
    });
    assert!(decimal.accepts(PhysicalType::FixedLenByteArray));
    assert!(!decimal.accepts(PhysicalType::Double));
    assert!(PhysicalType::ByteArray.is_binary());
    assert!(!PhysicalType::Int96.is_binary());
}

#[test]
fn test_schema_serde() {
    let schema = SchemaElement::new("amount", PhysicalType::FixedLenByteArray)
        .with_decimal(2, 10)
        .with_type_length(5);
    let json = serde_json::to_value(&schema).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "amount",
            "physical_type": "FIXED_LEN_BYTE_ARRAY",
            "converted_type": "DECIMAL",
            "scale": 2,
            "precision": 10,
            "type_length": 5
        })
    );
    let back: SchemaElement = serde_json::from_value(json).unwrap();
    assert_eq!(back, schema);

    let parsed: SchemaElement = serde_json::from_str(
        r#"{"name": "d", "physical_type": "INT32", "converted_type": "date"}"#,
    )
    .unwrap();
    assert_eq!(parsed.converted_type, Some(ConvertedType::Date));
    assert!(
        serde_json::from_str::<SchemaElement>(r#"{"name": "d", "physical_type": "INT7"}"#)
            .is_err()
    );
}

#[test]
fn test_from_converted_type_covers_every_annotation() {
    let params = DecimalParams {
        scale: 2,
        precision: 5,
    };
    for &converted in ConvertedType::ENUM_VALUES {
        match LogicalType::from_converted_type(converted, params) {
            Some(logical) => {
                assert!(!converted.is_structural());
                assert_eq!(logical.converted_type(), converted);
            }
            None => assert!(converted.is_structural()),
        }
    }
    assert_eq!(
        LogicalType::from_converted_type(ConvertedType::Decimal, params),
        Some(LogicalType::Decimal(params))
    );
}
