use colconv_common::{
    Result,
    error::{DocumentFormat, Error},
};
use colconv_sequence::DocumentValue;

use crate::text_conversions::bytes_to_text;

/// Parses a UTF-8 JSON document into a [`DocumentValue`] tree.
///
/// `\uXXXX` escapes are decoded and surrogate pairs are reassembled into a
/// single character. Object keys keep their document order. Integers keep
/// every digit, however large.
///
/// # Errors
/// `InvalidEncoding` if the bytes are not UTF-8, `MalformedDocument` if the
/// text is not a single valid JSON value.
pub fn bytes_to_json(bytes: &[u8]) -> Result<DocumentValue> {
    let text = bytes_to_text(bytes, "JSON")?;
    let value: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
        Error::malformed_document_with_source(
            DocumentFormat::Json,
            format!("line {} column {}: {e}", e.line(), e.column()),
            e,
        )
    })?;
    Ok(DocumentValue::from(value))
}
