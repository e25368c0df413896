//! Error types and diagnostics for SSML parsing.
//!
//! Every grammar or root-validation violation surfaces as a single
//! [`ParseError`] carrying a message and the [`SourceLocation`] at which the
//! violation was detected. Parsing is fail-fast: the first error aborts the
//! call and no partial tree is produced.

use std::fmt;

use crate::encoding::EncodingError;

/// Source location within an SSML document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number (in characters, not bytes).
    pub column: u32,
    /// 0-based byte offset from the start of the input.
    pub byte_offset: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The expected and actual names of a mismatched closing tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMismatch {
    /// Name of the tag that was open.
    pub expected: String,
    /// Name found in the `</...>` sequence.
    pub found: String,
}

/// The error type returned when SSML parsing fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Human-readable error message.
    pub message: String,
    /// Where in the source the error was detected.
    pub location: SourceLocation,
    /// Set when a closing tag did not match the open tag.
    pub mismatch: Option<TagMismatch>,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            message: message.into(),
            location,
            mismatch: None,
        }
    }

    /// Returns the byte offset at which the error was detected.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.location.byte_offset
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error at {}: {}", self.location, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Any failure from the byte-level entry points.
///
/// String entry points only ever fail with [`ParseError`]; this enum exists
/// for callers that start from raw bytes (files, network payloads).
#[derive(Debug, Clone)]
pub enum Error {
    /// The input bytes could not be decoded to UTF-8.
    Encoding(EncodingError),
    /// The decoded text is not well-formed SSML.
    Parse(ParseError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encoding(e) => e.fmt(f),
            Self::Parse(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encoding(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<EncodingError> for Error {
    fn from(e: EncodingError) -> Self {
        Self::Encoding(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}
