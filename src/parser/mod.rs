//! SSML parser.
//!
//! A hand-rolled recursive descent parser that turns SSML text into a
//! [`Node`] tree. Parsing is single-pass and fail-fast: the first grammar
//! violation aborts with a [`ParseError`] and no partial tree is returned.
//!
//! The grammar is tag-agnostic. Requiring the root to be `<speak>` is a
//! separate check applied by [`parse_ssml`] after the grammar succeeds;
//! [`parse_markup`] runs the grammar alone.

pub(crate) mod input;
mod ssml;

use tracing::debug;

use crate::encoding::decode_to_utf8;
use crate::error::{Error, ParseError};
use crate::tree::Node;

use input::{
    DEFAULT_MAX_ATTRIBUTES, DEFAULT_MAX_DEPTH, DEFAULT_MAX_NAME_LENGTH, DEFAULT_MAX_TEXT_LENGTH,
};

/// The root element name SSML documents must use.
pub const SSML_ROOT: &str = "speak";

/// Parse options controlling parser behavior and security limits.
///
/// Use the builder pattern to configure options:
///
/// ```
/// use ssmloxide::parser::ParseOptions;
///
/// let opts = ParseOptions::default()
///     .max_depth(64)
///     .max_attributes(16);
/// ```
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Maximum tag nesting depth (default: 256).
    pub max_depth: u32,
    /// Maximum number of attributes on a single tag (default: 256).
    pub max_attributes: u32,
    /// Maximum length in bytes of a single text run or attribute value,
    /// measured before entity decoding (default: 10 MB).
    pub max_text_length: usize,
    /// Maximum length in bytes of a tag or attribute name (default: 50,000).
    pub max_name_length: usize,
    /// Root element name required by [`parse_ssml_with_options`]
    /// (default: `"speak"`).
    pub root_name: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_attributes: DEFAULT_MAX_ATTRIBUTES,
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
            root_name: SSML_ROOT.to_string(),
        }
    }
}

impl ParseOptions {
    /// Sets the maximum tag nesting depth.
    #[must_use]
    pub fn max_depth(mut self, max: u32) -> Self {
        self.max_depth = max;
        self
    }

    /// Sets the maximum number of attributes per tag.
    #[must_use]
    pub fn max_attributes(mut self, max: u32) -> Self {
        self.max_attributes = max;
        self
    }

    /// Sets the maximum text run / attribute value length in bytes.
    #[must_use]
    pub fn max_text_length(mut self, max: usize) -> Self {
        self.max_text_length = max;
        self
    }

    /// Sets the maximum tag/attribute name length in bytes.
    #[must_use]
    pub fn max_name_length(mut self, max: usize) -> Self {
        self.max_name_length = max;
        self
    }

    /// Sets the root element name that [`parse_ssml_with_options`] requires.
    #[must_use]
    pub fn root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }
}

/// Parses an SSML document with default options.
///
/// # Errors
///
/// Returns `ParseError` if the input is not well-formed or its root element
/// is not `<speak>`.
///
/// # Examples
///
/// ```
/// use ssmloxide::parser::parse_ssml;
///
/// let root = parse_ssml("<speak>Hello</speak>").unwrap();
/// assert_eq!(root.name(), Some("speak"));
/// assert_eq!(root.text_content(), "Hello");
///
/// assert!(parse_ssml("<foo></foo>").is_err());
/// ```
pub fn parse_ssml(input: &str) -> Result<Node, ParseError> {
    parse_ssml_with_options(input, &ParseOptions::default())
}

/// Parses an SSML document with the given options.
///
/// The root element must be named [`ParseOptions::root_name`].
///
/// # Errors
///
/// Returns `ParseError` if the input is not well-formed, a limit in
/// `options` is exceeded, or the root element has the wrong name.
pub fn parse_ssml_with_options(input: &str, options: &ParseOptions) -> Result<Node, ParseError> {
    run(input, options, Some(options.root_name.as_str()))
}

/// Parses markup with the SSML grammar but accepts any root tag name.
///
/// # Errors
///
/// Returns `ParseError` if the input is not well-formed or a limit in
/// `options` is exceeded.
///
/// # Examples
///
/// ```
/// use ssmloxide::parser::{parse_markup, ParseOptions};
///
/// let root = parse_markup("<voice name=\"Joanna\">Hi</voice>", &ParseOptions::default()).unwrap();
/// assert_eq!(root.name(), Some("voice"));
/// ```
pub fn parse_markup(input: &str, options: &ParseOptions) -> Result<Node, ParseError> {
    run(input, options, None)
}

/// Decodes raw bytes (honouring a UTF-8 or UTF-16 BOM) and parses them as
/// an SSML document.
///
/// # Errors
///
/// Returns [`Error::Encoding`] if the bytes cannot be decoded, or
/// [`Error::Parse`] if the decoded text is not valid SSML.
pub fn parse_ssml_bytes(bytes: &[u8], options: &ParseOptions) -> Result<Node, Error> {
    let text = decode_to_utf8(bytes)?;
    Ok(parse_ssml_with_options(&text, options)?)
}

fn run(input: &str, options: &ParseOptions, required_root: Option<&str>) -> Result<Node, ParseError> {
    debug!(len = input.len(), root = ?required_root, "parsing markup");
    let mut parser = ssml::SsmlParser::new(input, options);
    match parser.parse(required_root) {
        Ok(node) => {
            debug!(root = ?node.name(), "parsed markup");
            Ok(node)
        }
        Err(err) => {
            debug!(error = %err, "parse failed");
            Err(err)
        }
    }
}
