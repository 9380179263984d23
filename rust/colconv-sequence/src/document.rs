use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use num_bigint::BigInt;

/// Ordered mapping of a document's fields.
pub type DocumentMap = IndexMap<String, DocumentValue>;

/// Node of a parsed structured document (JSON or BSON).
///
/// Mappings keep their keys in document order. The variants after `Document`
/// only arise from BSON, which has leaf types JSON cannot express.
#[derive(Clone, Debug, PartialEq)]
pub enum DocumentValue {
    Null,
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    /// JSON integer above `i64::MAX` that fits in 64 unsigned bits.
    UInt64(u64),
    /// JSON integer outside the 64-bit ranges, kept exact.
    BigInt(BigInt),
    Double(f64),
    String(String),
    Array(Vec<DocumentValue>),
    Document(DocumentMap),
    Binary { subtype: u8, bytes: Vec<u8> },
    ObjectId([u8; 12]),
    DateTime(DateTime<Utc>),
    /// Internal replication timestamp: seconds since the epoch and an ordinal.
    Timestamp { time: u32, increment: u32 },
    Regex { pattern: String, options: String },
    JavaScript(String),
    /// IEEE 754-2008 decimal128 in its little-endian BID encoding.
    Decimal128([u8; 16]),
    Undefined,
    MinKey,
    MaxKey,
}

impl DocumentValue {
    pub fn is_null(&self) -> bool {
        matches!(self, DocumentValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DocumentValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DocumentValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Integral value of an `Int32` or `Int64` node.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DocumentValue::Int32(v) => Some(*v as i64),
            DocumentValue::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            DocumentValue::Int32(v) => u64::try_from(*v).ok(),
            DocumentValue::Int64(v) => u64::try_from(*v).ok(),
            DocumentValue::UInt64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DocumentValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[DocumentValue]> {
        match self {
            DocumentValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&DocumentMap> {
        match self {
            DocumentValue::Document(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a field of a `Document` node.
    pub fn get(&self, key: &str) -> Option<&DocumentValue> {
        self.as_document()?.get(key)
    }
}

impl From<&str> for DocumentValue {
    fn from(s: &str) -> Self {
        DocumentValue::String(s.to_string())
    }
}

impl From<String> for DocumentValue {
    fn from(s: String) -> Self {
        DocumentValue::String(s)
    }
}

impl From<bool> for DocumentValue {
    fn from(b: bool) -> Self {
        DocumentValue::Boolean(b)
    }
}

impl From<i32> for DocumentValue {
    fn from(v: i32) -> Self {
        DocumentValue::Int32(v)
    }
}

impl From<i64> for DocumentValue {
    fn from(v: i64) -> Self {
        DocumentValue::Int64(v)
    }
}

impl From<f64> for DocumentValue {
    fn from(v: f64) -> Self {
        DocumentValue::Double(v)
    }
}

impl From<Vec<DocumentValue>> for DocumentValue {
    fn from(items: Vec<DocumentValue>) -> Self {
        DocumentValue::Array(items)
    }
}

impl From<DocumentMap> for DocumentValue {
    fn from(map: DocumentMap) -> Self {
        DocumentValue::Document(map)
    }
}

/// Integers take the narrowest of `Int64`, `UInt64` and `BigInt` that holds
/// them exactly. Numbers with a fraction or an exponent become `Double`.
impl From<serde_json::Number> for DocumentValue {
    fn from(n: serde_json::Number) -> Self {
        if let Some(v) = n.as_i64() {
            return DocumentValue::Int64(v);
        }
        if let Some(v) = n.as_u64() {
            return DocumentValue::UInt64(v);
        }
        match n.to_string().parse::<BigInt>() {
            Ok(v) => DocumentValue::BigInt(v),
            Err(_) => DocumentValue::Double(n.as_f64().unwrap_or(f64::NAN)),
        }
    }
}

/// Builds the document tree of a parsed JSON value.
impl From<serde_json::Value> for DocumentValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => DocumentValue::Null,
            serde_json::Value::Bool(b) => DocumentValue::Boolean(b),
            serde_json::Value::Number(n) => DocumentValue::from(n),
            serde_json::Value::String(s) => DocumentValue::String(s),
            serde_json::Value::Array(items) => {
                DocumentValue::Array(items.into_iter().map(DocumentValue::from).collect())
            }
            serde_json::Value::Object(map) => DocumentValue::Document(
                map.into_iter()
                    .map(|(k, v)| (k, DocumentValue::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_preserves_key_order() {
        let doc = DocumentValue::from(json!({"zeta": 1, "alpha": [true, null], "mid": 2.5}));
        let keys: Vec<_> = doc.as_document().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(doc.get("zeta").and_then(DocumentValue::as_i64), Some(1));
        assert_eq!(doc.get("mid").and_then(DocumentValue::as_f64), Some(2.5));
        let alpha = doc.get("alpha").unwrap().as_array().unwrap();
        assert_eq!(alpha, &[DocumentValue::Boolean(true), DocumentValue::Null]);
    }

    #[test]
    fn test_large_integers_are_exact() {
        let max = DocumentValue::from(json!(u64::MAX));
        assert_eq!(max, DocumentValue::UInt64(u64::MAX));
        assert_eq!(max.as_u64(), Some(u64::MAX));
        assert_ne!(max, DocumentValue::from(json!(u64::MAX - 2)));
        assert_eq!(DocumentValue::from(json!(7u64)), DocumentValue::Int64(7));

        let huge: serde_json::Value = serde_json::from_str("-340282366920938463463374607431768211457").unwrap();
        let expected: BigInt = "-340282366920938463463374607431768211457".parse().unwrap();
        assert_eq!(DocumentValue::from(huge), DocumentValue::BigInt(expected));
    }

    #[test]
    fn test_fractions_and_exponents_are_doubles() {
        let value: serde_json::Value = serde_json::from_str("[1.5, 1e3, -0.0]").unwrap();
        let items = DocumentValue::from(value);
        let items = items.as_array().unwrap();
        assert_eq!(items[0], DocumentValue::Double(1.5));
        assert_eq!(items[1], DocumentValue::Double(1000.0));
        assert_eq!(items[2].as_f64(), Some(0.0));
    }

    #[test]
    fn test_equality_across_int_widths_is_strict() {
        assert_ne!(DocumentValue::Int32(1), DocumentValue::Int64(1));
        assert_eq!(
            DocumentValue::Int32(1).as_i64(),
            DocumentValue::Int64(1).as_i64()
        );
    }
}
