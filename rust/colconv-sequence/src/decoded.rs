use crate::{raw::RawColumn, value::LogicalValue};

/// Result of converting a [`RawColumn`].
///
/// Columns without a converted type come back unchanged as `Raw`; all others
/// come back as `Values`, one per input row in the same order.
#[derive(Clone, Debug, PartialEq)]
pub enum DecodedColumn {
    Raw(RawColumn),
    Values(Vec<LogicalValue>),
}

impl DecodedColumn {
    pub fn len(&self) -> usize {
        match self {
            DecodedColumn::Raw(raw) => raw.len(),
            DecodedColumn::Values(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the column was passed through without conversion.
    pub fn is_passthrough(&self) -> bool {
        matches!(self, DecodedColumn::Raw(_))
    }

    pub fn values(&self) -> Option<&[LogicalValue]> {
        match self {
            DecodedColumn::Values(values) => Some(values),
            DecodedColumn::Raw(_) => None,
        }
    }

    pub fn raw(&self) -> Option<&RawColumn> {
        match self {
            DecodedColumn::Raw(raw) => Some(raw),
            DecodedColumn::Values(_) => None,
        }
    }

    pub fn into_values(self) -> Option<Vec<LogicalValue>> {
        match self {
            DecodedColumn::Values(values) => Some(values),
            DecodedColumn::Raw(_) => None,
        }
    }

    /// Decoded value at `index`, if the column was converted.
    pub fn value(&self, index: usize) -> Option<&LogicalValue> {
        self.values()?.get(index)
    }
}

impl From<Vec<LogicalValue>> for DecodedColumn {
    fn from(values: Vec<LogicalValue>) -> Self {
        DecodedColumn::Values(values)
    }
}
