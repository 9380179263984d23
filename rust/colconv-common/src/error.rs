use std::fmt;

use thiserror::Error;

/// Error returned by every fallible colconv operation.
///
/// The error is a boxed [`ErrorKind`] plus, for failures raised while converting
/// a column, the index of the offending row.
#[derive(Debug)]
pub struct Error {
    kind: Box<ErrorKind>,
    row: Option<usize>,
}

pub type StdErrorBoxed = Box<dyn std::error::Error + Send + Sync + 'static>;

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.kind.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.kind
    }

    /// Index of the column row that failed to convert, when known.
    pub fn row(&self) -> Option<usize> {
        self.row
    }

    /// Attaches the index of the failing row. An already attached row is kept.
    pub fn at_row(mut self, row: usize) -> Error {
        self.row.get_or_insert(row);
        self
    }

    pub fn unsupported_conversion(
        converted_type: impl Into<String>,
        physical_type: impl Into<String>,
    ) -> Error {
        ErrorKind::UnsupportedConversion {
            converted_type: converted_type.into(),
            physical_type: physical_type.into(),
        }
        .into()
    }

    pub fn invalid_input(element: impl Into<String>, message: impl Into<String>) -> Error {
        ErrorKind::InvalidInput {
            element: element.into(),
            message: message.into(),
        }
        .into()
    }

    pub fn invalid_encoding(element: impl Into<String>, source: std::str::Utf8Error) -> Error {
        ErrorKind::InvalidEncoding {
            element: element.into(),
            source,
        }
        .into()
    }

    pub fn malformed_document(format: DocumentFormat, message: impl Into<String>) -> Error {
        ErrorKind::MalformedDocument {
            format,
            message: message.into(),
            source: None,
        }
        .into()
    }

    pub fn malformed_document_with_source<E>(
        format: DocumentFormat,
        message: impl Into<String>,
        source: E,
    ) -> Error
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ErrorKind::MalformedDocument {
            format,
            message: message.into(),
            source: Some(Box::new(source)),
        }
        .into()
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        ErrorKind::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
        .into()
    }

    pub fn is_unsupported_conversion(&self) -> bool {
        matches!(self.kind(), ErrorKind::UnsupportedConversion { .. })
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidInput { .. })
    }

    pub fn is_invalid_encoding(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidEncoding { .. })
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidArgument { .. })
    }

    pub fn is_malformed_document(&self) -> bool {
        matches!(self.kind(), ErrorKind::MalformedDocument { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.row {
            Some(row) => write!(f, "row {row}: {}", self.kind),
            None => fmt::Display::fmt(&self.kind, f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

/// Structured document encodings understood by the document converters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Json,
    Bson,
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Json => f.write_str("JSON"),
            DocumentFormat::Bson => f.write_str("BSON"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("no converter registered for {converted_type} over {physical_type}")]
    UnsupportedConversion {
        converted_type: String,
        physical_type: String,
    },

    #[error("invalid input for '{element}': {message}")]
    InvalidInput { element: String, message: String },

    #[error("invalid UTF-8 in '{element}': {source}")]
    InvalidEncoding {
        element: String,
        source: std::str::Utf8Error,
    },

    #[error("malformed {format} document: {message}")]
    MalformedDocument {
        format: DocumentFormat,
        message: String,
        source: Option<StdErrorBoxed>,
    },

    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error {
            kind: kind.into(),
            row: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_prefix_in_message() {
        let err = Error::invalid_input("decimal", "empty byte string").at_row(7);
        assert_eq!(err.row(), Some(7));
        assert_eq!(
            err.to_string(),
            "row 7: invalid input for 'decimal': empty byte string"
        );
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_first_row_wins() {
        let err = Error::invalid_arg("scale", "negative").at_row(1).at_row(2);
        assert_eq!(err.row(), Some(1));
    }

    #[test]
    fn test_encoding_error_source() {
        let bytes = [0xffu8, 0xfe];
        let utf8_err = std::str::from_utf8(&bytes).unwrap_err();
        let err = Error::invalid_encoding("UTF8", utf8_err);
        assert!(err.is_invalid_encoding());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_unsupported_conversion_message() {
        let err = Error::unsupported_conversion("DECIMAL", "DOUBLE");
        assert!(err.is_unsupported_conversion());
        assert_eq!(
            err.to_string(),
            "no converter registered for DECIMAL over DOUBLE"
        );
        assert!(matches!(
            err.into_kind(),
            ErrorKind::UnsupportedConversion { .. }
        ));
    }
}
