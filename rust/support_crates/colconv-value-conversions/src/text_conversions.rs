use colconv_common::{Result, error::Error};

/// Decodes a byte string as UTF-8 text.
///
/// `element` names the converted type in the error (`UTF8`, `ENUM`, `JSON`).
#[inline]
pub fn bytes_to_text(bytes: &[u8], element: &str) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| Error::invalid_encoding(element, e))
}
