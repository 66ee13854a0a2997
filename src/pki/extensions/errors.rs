use thiserror::Error;
use x509_parser::extensions::ParsedExtension;

/// Failure to interpret a single extension payload.
///
/// Always recovered by the caller and recorded on the extension itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtensionDecodeError {
    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("unexpected structure, expected {0}")]
    UnexpectedStructure(&'static str),
}

impl ExtensionDecodeError {
    /// Maps a parsed form that did not match what a decoder expected.
    pub(crate) fn from_parsed(parsed: &ParsedExtension<'_>, expected: &'static str) -> Self {
        match parsed {
            ParsedExtension::ParseError { error } => Self::Malformed(error.to_string()),
            _ => Self::UnexpectedStructure(expected),
        }
    }
}

impl<E: std::fmt::Debug> From<x509_parser::nom::Err<E>> for ExtensionDecodeError {
    fn from(error: x509_parser::nom::Err<E>) -> Self {
        Self::Malformed(error.to_string())
    }
}
