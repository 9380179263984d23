//! Decoding of BSON binary documents into [`DocumentValue`] trees.
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! document ::= int32 e_list 0x00       int32 = total size, including itself and the 0x00
//! e_list   ::= (type:u8 key:cstring value)*
//! string   ::= int32 bytes 0x00        int32 = byte count including the trailing 0x00
//! binary   ::= int32 subtype:u8 bytes  int32 = byte count of `bytes`
//! ```
//!
//! Arrays are documents whose keys are `"0"`, `"1"`, ...; their keys are
//! ignored and every value is taken in document order.

use byteorder::{ByteOrder, LittleEndian};
use chrono::DateTime;
use colconv_common::{
    Result,
    error::{DocumentFormat, Error},
};
use colconv_sequence::{DocumentValue, document::DocumentMap};

/// Default limit on document/array nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

const MIN_DOCUMENT_SIZE: usize = 5;
const BINARY_SUBTYPE_BINARY_OLD: u8 = 0x02;

/// Element type tags.
mod element_type {
    pub const DOUBLE: u8 = 0x01;
    pub const STRING: u8 = 0x02;
    pub const DOCUMENT: u8 = 0x03;
    pub const ARRAY: u8 = 0x04;
    pub const BINARY: u8 = 0x05;
    pub const UNDEFINED: u8 = 0x06;
    pub const OBJECT_ID: u8 = 0x07;
    pub const BOOLEAN: u8 = 0x08;
    pub const DATETIME: u8 = 0x09;
    pub const NULL: u8 = 0x0A;
    pub const REGEX: u8 = 0x0B;
    pub const DB_POINTER: u8 = 0x0C;
    pub const JAVASCRIPT: u8 = 0x0D;
    pub const SYMBOL: u8 = 0x0E;
    pub const JAVASCRIPT_WITH_SCOPE: u8 = 0x0F;
    pub const INT32: u8 = 0x10;
    pub const TIMESTAMP: u8 = 0x11;
    pub const INT64: u8 = 0x12;
    pub const DECIMAL128: u8 = 0x13;
    pub const MIN_KEY: u8 = 0xFF;
    pub const MAX_KEY: u8 = 0x7F;
}

/// Decodes a complete BSON document. The buffer must hold exactly one document.
pub fn bytes_to_bson(bytes: &[u8], max_depth: usize) -> Result<DocumentValue> {
    let mut reader = BsonReader::new(bytes, max_depth);
    let document = reader.read_document(0)?;
    if !reader.is_empty() {
        return Err(malformed(format!(
            "{} trailing bytes after the document",
            reader.remaining()
        )));
    }
    Ok(DocumentValue::Document(document))
}

#[cold]
fn malformed(message: impl Into<String>) -> Error {
    Error::malformed_document(DocumentFormat::Bson, message)
}

struct BsonReader<'a> {
    buf: &'a [u8],
    pos: usize,
    max_depth: usize,
}

impl<'a> BsonReader<'a> {
    fn new(buf: &'a [u8], max_depth: usize) -> BsonReader<'a> {
        BsonReader {
            buf,
            pos: 0,
            max_depth,
        }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(malformed(format!(
                "truncated {what} at offset {}: need {len} bytes, have {}",
                self.pos,
                self.remaining()
            )));
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn read_u8(&mut self, what: &str) -> Result<u8> {
        Ok(self.take(1, what)?[0])
    }

    fn read_i32(&mut self, what: &str) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.take(4, what)?))
    }

    fn read_u32(&mut self, what: &str) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.take(4, what)?))
    }

    fn read_i64(&mut self, what: &str) -> Result<i64> {
        Ok(LittleEndian::read_i64(self.take(8, what)?))
    }

    fn read_f64(&mut self, what: &str) -> Result<f64> {
        Ok(LittleEndian::read_f64(self.take(8, what)?))
    }

    fn read_array<const N: usize>(&mut self, what: &str) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, what)?);
        Ok(out)
    }

    /// Reads an int32 length prefix, rejecting negative values.
    fn read_length(&mut self, what: &str) -> Result<usize> {
        let len = self.read_i32(what)?;
        usize::try_from(len)
            .map_err(|_| malformed(format!("negative {what} length {len}")))
    }

    fn read_cstring(&mut self, what: &str) -> Result<String> {
        let rest = &self.buf[self.pos..];
        let nul = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| malformed(format!("unterminated {what} at offset {}", self.pos)))?;
        let bytes = self.take(nul, what)?;
        self.pos += 1;
        utf8(bytes, what)
    }

    fn read_string(&mut self, what: &str) -> Result<String> {
        let len = self.read_length(what)?;
        if len == 0 {
            return Err(malformed(format!("{what} length must include the terminator")));
        }
        let bytes = self.take(len, what)?;
        let (text, terminator) = bytes.split_at(len - 1);
        if terminator != [0] {
            return Err(malformed(format!("{what} is not null-terminated")));
        }
        utf8(text, what)
    }

    /// Reads an embedded document into an ordered map. A repeated key keeps
    /// its first position and its last value.
    fn read_document(&mut self, depth: usize) -> Result<DocumentMap> {
        Ok(self.read_elements(depth)?.into_iter().collect())
    }

    /// Reads an array body, keeping every element in document order.
    fn read_array_elements(&mut self, depth: usize) -> Result<Vec<DocumentValue>> {
        Ok(self
            .read_elements(depth)?
            .into_iter()
            .map(|(_, value)| value)
            .collect())
    }

    fn read_elements(&mut self, depth: usize) -> Result<Vec<(String, DocumentValue)>> {
        if depth >= self.max_depth {
            return Err(malformed(format!(
                "nesting exceeds the maximum depth of {}",
                self.max_depth
            )));
        }
        let start = self.pos;
        let len = self.read_length("document")?;
        if len < MIN_DOCUMENT_SIZE {
            return Err(malformed(format!("document size {len} is too small")));
        }
        let body = self.take(len - 4, "document")?;
        let (elements, terminator) = body.split_at(body.len() - 1);
        if terminator != [0] {
            return Err(malformed(format!(
                "document at offset {start} is not null-terminated"
            )));
        }

        let mut inner = BsonReader::new(elements, self.max_depth);
        let mut entries = Vec::new();
        while !inner.is_empty() {
            let tag = inner.read_u8("element type")?;
            let key = inner.read_cstring("element key")?;
            let value = inner.read_value(tag, &key, depth)?;
            entries.push((key, value));
        }
        Ok(entries)
    }

    fn read_value(&mut self, tag: u8, key: &str, depth: usize) -> Result<DocumentValue> {
        use element_type::*;

        let value = match tag {
            DOUBLE => DocumentValue::Double(self.read_f64("double")?),
            STRING => DocumentValue::String(self.read_string("string")?),
            DOCUMENT => DocumentValue::Document(self.read_document(depth + 1)?),
            ARRAY => DocumentValue::Array(self.read_array_elements(depth + 1)?),
            BINARY => self.read_binary()?,
            UNDEFINED => DocumentValue::Undefined,
            OBJECT_ID => DocumentValue::ObjectId(self.read_array("object id")?),
            BOOLEAN => match self.read_u8("boolean")? {
                0 => DocumentValue::Boolean(false),
                1 => DocumentValue::Boolean(true),
                other => {
                    return Err(malformed(format!(
                        "invalid boolean byte {other:#04x} for key '{key}'"
                    )));
                }
            },
            DATETIME => {
                let millis = self.read_i64("datetime")?;
                let ts = DateTime::from_timestamp_millis(millis).ok_or_else(|| {
                    malformed(format!("datetime {millis} ms for key '{key}' is out of range"))
                })?;
                DocumentValue::DateTime(ts)
            }
            NULL => DocumentValue::Null,
            REGEX => {
                let pattern = self.read_cstring("regex pattern")?;
                let options = self.read_cstring("regex options")?;
                DocumentValue::Regex { pattern, options }
            }
            DB_POINTER => {
                let namespace = self.read_string("db pointer namespace")?;
                let id = self.read_array("db pointer id")?;
                let mut map = DocumentMap::new();
                map.insert("$ref".to_string(), DocumentValue::String(namespace));
                map.insert("$id".to_string(), DocumentValue::ObjectId(id));
                DocumentValue::Document(map)
            }
            JAVASCRIPT => DocumentValue::JavaScript(self.read_string("javascript")?),
            SYMBOL => DocumentValue::String(self.read_string("symbol")?),
            JAVASCRIPT_WITH_SCOPE => self.read_code_with_scope(depth)?,
            INT32 => DocumentValue::Int32(self.read_i32("int32")?),
            TIMESTAMP => {
                let increment = self.read_u32("timestamp increment")?;
                let time = self.read_u32("timestamp seconds")?;
                DocumentValue::Timestamp { time, increment }
            }
            INT64 => DocumentValue::Int64(self.read_i64("int64")?),
            DECIMAL128 => DocumentValue::Decimal128(self.read_array("decimal128")?),
            MIN_KEY => DocumentValue::MinKey,
            MAX_KEY => DocumentValue::MaxKey,
            other => {
                return Err(malformed(format!(
                    "unknown element type {other:#04x} for key '{key}'"
                )));
            }
        };
        Ok(value)
    }

    fn read_binary(&mut self) -> Result<DocumentValue> {
        let len = self.read_length("binary")?;
        let subtype = self.read_u8("binary subtype")?;
        let mut bytes = self.take(len, "binary")?;
        // The old binary subtype repeats the length inside the payload.
        if subtype == BINARY_SUBTYPE_BINARY_OLD {
            if bytes.len() < 4 || LittleEndian::read_i32(bytes) as i64 != bytes.len() as i64 - 4 {
                return Err(malformed("inconsistent length in old binary subtype"));
            }
            bytes = &bytes[4..];
        }
        Ok(DocumentValue::Binary {
            subtype,
            bytes: bytes.to_vec(),
        })
    }

    fn read_code_with_scope(&mut self, depth: usize) -> Result<DocumentValue> {
        let start = self.pos;
        let total = self.read_length("code with scope")?;
        let code = self.read_string("code with scope")?;
        let scope = self.read_document(depth + 1)?;
        if self.pos - start != total {
            return Err(malformed(format!(
                "code with scope declares {total} bytes but spans {}",
                self.pos - start
            )));
        }
        let mut map = DocumentMap::new();
        map.insert("$code".to_string(), DocumentValue::JavaScript(code));
        map.insert("$scope".to_string(), DocumentValue::Document(scope));
        Ok(DocumentValue::Document(map))
    }
}

fn utf8(bytes: &[u8], what: &str) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| {
            Error::malformed_document_with_source(
                DocumentFormat::Bson,
                format!("{what} is not valid UTF-8"),
                e,
            )
        })
}
