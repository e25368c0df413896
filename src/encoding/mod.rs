//! Byte-level input decoding.
//!
//! SSML arriving from files or network payloads is frequently prefixed with
//! a Byte Order Mark, and speech toolchains on Windows still emit UTF-16.
//! This module sniffs the BOM, strips it, and transcodes to UTF-8 through
//! `encoding_rs` so the parser only ever sees `&str`.
//!
//! There is no XML declaration sniffing: `<?xml ...?>` prologs are outside
//! the accepted grammar, so without a BOM the input is taken to be UTF-8.

use std::fmt;

/// An error that occurs during encoding detection or transcoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingError {
    /// A human-readable description of the encoding error.
    pub message: String,
}

impl EncodingError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "encoding error: {}", self.message)
    }
}

impl std::error::Error for EncodingError {}

/// Detects the encoding of a byte stream by inspecting the Byte Order Mark.
///
/// Returns a tuple of (encoding label, number of BOM bytes to skip):
/// - `EF BB BF` -> UTF-8
/// - `FE FF`    -> UTF-16 BE
/// - `FF FE`    -> UTF-16 LE
/// - No BOM     -> UTF-8
///
/// # Examples
///
/// ```
/// use ssmloxide::encoding::detect_encoding;
///
/// let (enc, skip) = detect_encoding(b"\xEF\xBB\xBF<speak/>");
/// assert_eq!(enc, "UTF-8");
/// assert_eq!(skip, 3);
///
/// let (enc, skip) = detect_encoding(b"<speak/>");
/// assert_eq!(enc, "UTF-8");
/// assert_eq!(skip, 0);
/// ```
#[must_use]
pub fn detect_encoding(bytes: &[u8]) -> (&'static str, usize) {
    match bytes {
        [0xEF, 0xBB, 0xBF, ..] => ("UTF-8", 3),
        [0xFE, 0xFF, ..] => ("UTF-16BE", 2),
        [0xFF, 0xFE, ..] => ("UTF-16LE", 2),
        _ => ("UTF-8", 0),
    }
}

/// Transcodes a byte slice from the named encoding into a UTF-8 `String`.
///
/// # Errors
///
/// Returns `EncodingError` if the label is not recognized by `encoding_rs`
/// or if the input contains malformed byte sequences.
pub fn transcode(bytes: &[u8], encoding_name: &str) -> Result<String, EncodingError> {
    let encoding = encoding_rs::Encoding::for_label(encoding_name.as_bytes())
        .ok_or_else(|| EncodingError::new(format!("unsupported encoding: {encoding_name}")))?;

    // `decode_without_bom_handling` so a BOM we already stripped is not
    // second-guessed, and a stray second BOM stays visible as U+FEFF.
    let (result, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(EncodingError::new(format!(
            "malformed byte sequence for encoding {encoding_name}"
        )));
    }
    Ok(result.into_owned())
}

/// Decodes raw bytes into a UTF-8 string, honouring a leading BOM.
///
/// # Errors
///
/// Returns `EncodingError` if the bytes are not valid in the detected
/// encoding.
///
/// # Examples
///
/// ```
/// use ssmloxide::encoding::decode_to_utf8;
///
/// let text = decode_to_utf8(b"\xEF\xBB\xBF<speak>hi</speak>").unwrap();
/// assert_eq!(text, "<speak>hi</speak>");
/// ```
pub fn decode_to_utf8(bytes: &[u8]) -> Result<String, EncodingError> {
    let (encoding, skip) = detect_encoding(bytes);
    let content = &bytes[skip..];

    if encoding == "UTF-8" {
        return std::str::from_utf8(content)
            .map(str::to_string)
            .map_err(|e| {
                EncodingError::new(format!(
                    "input is not valid UTF-8 (at byte {})",
                    skip + e.valid_up_to()
                ))
            });
    }

    transcode(content, encoding)
}
