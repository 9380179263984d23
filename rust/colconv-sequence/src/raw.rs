use colconv_format::PhysicalType;

/// Column of physically decoded values, in row order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RawColumn {
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    /// Values of `BYTE_ARRAY` and `FIXED_LEN_BYTE_ARRAY` columns.
    Bytes(Vec<Vec<u8>>),
}

impl RawColumn {
    pub fn len(&self) -> usize {
        match self {
            RawColumn::Int32(values) => values.len(),
            RawColumn::Int64(values) => values.len(),
            RawColumn::Bytes(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short label of the element type, used in diagnostics.
    pub fn element_type(&self) -> &'static str {
        match self {
            RawColumn::Int32(_) => "INT32",
            RawColumn::Int64(_) => "INT64",
            RawColumn::Bytes(_) => "BYTES",
        }
    }

    /// Returns `true` if this column's element type is how values of
    /// `physical_type` are materialized.
    pub fn matches(&self, physical_type: PhysicalType) -> bool {
        match self {
            RawColumn::Int32(_) => physical_type == PhysicalType::Int32,
            RawColumn::Int64(_) => physical_type == PhysicalType::Int64,
            RawColumn::Bytes(_) => physical_type.is_binary(),
        }
    }
}

impl From<Vec<i32>> for RawColumn {
    fn from(values: Vec<i32>) -> Self {
        RawColumn::Int32(values)
    }
}

impl From<Vec<i64>> for RawColumn {
    fn from(values: Vec<i64>) -> Self {
        RawColumn::Int64(values)
    }
}

impl From<Vec<Vec<u8>>> for RawColumn {
    fn from(values: Vec<Vec<u8>>) -> Self {
        RawColumn::Bytes(values)
    }
}

impl From<Vec<&[u8]>> for RawColumn {
    fn from(values: Vec<&[u8]>) -> Self {
        RawColumn::Bytes(values.into_iter().map(<[u8]>::to_vec).collect())
    }
}
