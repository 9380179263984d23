//! Utilities for printing decoded values and columns as JSON.
//!
//! Provides a trait and implementations to convert values and columns into `serde_json::Value`.
//! Intended for diagnostics, command-line output, and testing.
//! Decimals are printed as strings so that no digits are lost; BSON-only leaf
//! types use MongoDB extended-JSON style wrappers (`{"$oid": ...}`, `{"$date": ...}`).

use chrono::SecondsFormat;
use serde_json::{Map, Number, Value, json};

use crate::{
    decoded::DecodedColumn, document::DocumentValue, raw::RawColumn, value::LogicalValue,
};

/// Conversion of a decoded value (or a whole column) into JSON.
pub trait ToJson {
    fn to_json(&self) -> Value;
}

impl ToJson for LogicalValue {
    fn to_json(&self) -> Value {
        match self {
            LogicalValue::Decimal(d) => Value::String(d.to_string()),
            LogicalValue::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
            LogicalValue::Duration(d) => Value::String(d.to_string()),
            LogicalValue::Timestamp(ts) => {
                Value::String(ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            LogicalValue::Text(s) => Value::String(s.clone()),
            LogicalValue::UInt(v) => Value::Number((*v).into()),
            LogicalValue::Int(v) => Value::Number((*v).into()),
            LogicalValue::Document(doc) => doc.to_json(),
        }
    }
}

impl ToJson for DocumentValue {
    fn to_json(&self) -> Value {
        match self {
            DocumentValue::Null | DocumentValue::Undefined => Value::Null,
            DocumentValue::Boolean(b) => Value::Bool(*b),
            DocumentValue::Int32(v) => Value::Number((*v).into()),
            DocumentValue::Int64(v) => Value::Number((*v).into()),
            DocumentValue::UInt64(v) => Value::Number((*v).into()),
            DocumentValue::BigInt(v) => {
                let digits = v.to_string();
                digits
                    .parse::<Number>()
                    .map_or(Value::String(digits), Value::Number)
            }
            DocumentValue::Double(v) => Number::from_f64(*v).map_or(Value::Null, Value::Number),
            DocumentValue::String(s) => Value::String(s.clone()),
            DocumentValue::Array(items) => Value::Array(items.iter().map(ToJson::to_json).collect()),
            DocumentValue::Document(map) => {
                let mut object = Map::with_capacity(map.len());
                for (key, value) in map {
                    object.insert(key.clone(), value.to_json());
                }
                Value::Object(object)
            }
            DocumentValue::Binary { subtype, bytes } => json!({
                "$binary": hex::encode(bytes),
                "$type": format!("{subtype:02x}"),
            }),
            DocumentValue::ObjectId(oid) => json!({ "$oid": hex::encode(oid) }),
            DocumentValue::DateTime(ts) => {
                json!({ "$date": ts.to_rfc3339_opts(SecondsFormat::Millis, true) })
            }
            DocumentValue::Timestamp { time, increment } => {
                json!({ "$timestamp": { "t": time, "i": increment } })
            }
            DocumentValue::Regex { pattern, options } => {
                json!({ "$regex": pattern, "$options": options })
            }
            DocumentValue::JavaScript(code) => json!({ "$code": code }),
            DocumentValue::Decimal128(bytes) => json!({ "$numberDecimalBytes": hex::encode(bytes) }),
            DocumentValue::MinKey => json!({ "$minKey": 1 }),
            DocumentValue::MaxKey => json!({ "$maxKey": 1 }),
        }
    }
}

impl ToJson for RawColumn {
    fn to_json(&self) -> Value {
        match self {
            RawColumn::Int32(values) => values.iter().map(|v| Value::from(*v)).collect(),
            RawColumn::Int64(values) => values.iter().map(|v| Value::from(*v)).collect(),
            RawColumn::Bytes(values) => values
                .iter()
                .map(|v| Value::String(hex::encode(v)))
                .collect(),
        }
    }
}

impl ToJson for DecodedColumn {
    fn to_json(&self) -> Value {
        match self {
            DecodedColumn::Raw(raw) => raw.to_json(),
            DecodedColumn::Values(values) => values.iter().map(ToJson::to_json).collect(),
        }
    }
}
