use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use colconv_decimal::Decimal;

use crate::document::DocumentValue;

/// A single decoded value of a logical column.
#[derive(Clone, Debug, PartialEq)]
pub enum LogicalValue {
    /// Exact decimal (`DECIMAL`).
    Decimal(Decimal),
    /// Calendar date (`DATE`).
    Date(NaiveDate),
    /// Elapsed time since midnight (`TIME_MILLIS`, `TIME_MICROS`). May fall
    /// outside a nominal day.
    Duration(TimeDelta),
    /// Absolute point in time (`TIMESTAMP_MILLIS`, `TIMESTAMP_MICROS`).
    Timestamp(DateTime<Utc>),
    /// Decoded text (`UTF8`, `ENUM`).
    Text(String),
    /// Reinterpreted unsigned integer (`UINT_8` .. `UINT_64`).
    UInt(u64),
    /// Signed integer (`INT_8` .. `INT_64`); narrow widths are sign-extended
    /// from their low bits.
    Int(i64),
    /// Parsed structured document (`JSON`, `BSON`).
    Document(DocumentValue),
}

impl LogicalValue {
    pub fn as_decimal(&self) -> Option<&Decimal> {
        match self {
            LogicalValue::Decimal(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            LogicalValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<TimeDelta> {
        match self {
            LogicalValue::Duration(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            LogicalValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            LogicalValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match self {
            LogicalValue::UInt(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            LogicalValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&DocumentValue> {
        match self {
            LogicalValue::Document(doc) => Some(doc),
            _ => None,
        }
    }
}

impl From<Decimal> for LogicalValue {
    fn from(d: Decimal) -> Self {
        LogicalValue::Decimal(d)
    }
}

impl From<NaiveDate> for LogicalValue {
    fn from(d: NaiveDate) -> Self {
        LogicalValue::Date(d)
    }
}

impl From<TimeDelta> for LogicalValue {
    fn from(d: TimeDelta) -> Self {
        LogicalValue::Duration(d)
    }
}

impl From<DateTime<Utc>> for LogicalValue {
    fn from(ts: DateTime<Utc>) -> Self {
        LogicalValue::Timestamp(ts)
    }
}

impl From<String> for LogicalValue {
    fn from(s: String) -> Self {
        LogicalValue::Text(s)
    }
}

impl From<u64> for LogicalValue {
    fn from(v: u64) -> Self {
        LogicalValue::UInt(v)
    }
}

impl From<i64> for LogicalValue {
    fn from(v: i64) -> Self {
        LogicalValue::Int(v)
    }
}

impl From<DocumentValue> for LogicalValue {
    fn from(doc: DocumentValue) -> Self {
        LogicalValue::Document(doc)
    }
}
