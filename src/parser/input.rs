//! Low-level input handling for the SSML parser.
//!
//! [`ParserInput`] owns the cursor: a byte offset into the borrowed source
//! text plus the line and column used for error locations. It provides the
//! primitives the grammar is written in terms of: peeking, advancing,
//! scanning runs of text, lexing names, and tracking nesting depth.
//!
//! The cursor only moves forward. Every primitive that consumes input
//! advances by at least one character or reports that it could not.

use crate::error::{ParseError, SourceLocation};

// -------------------------------------------------------------------------
// Security defaults
// -------------------------------------------------------------------------

/// Default maximum tag nesting depth.
pub(crate) const DEFAULT_MAX_DEPTH: u32 = 256;

/// Default maximum number of attributes on a single tag.
pub(crate) const DEFAULT_MAX_ATTRIBUTES: u32 = 256;

/// Default maximum length (in bytes) of a text run or attribute value.
pub(crate) const DEFAULT_MAX_TEXT_LENGTH: usize = 10 * 1024 * 1024; // 10 MB

/// Default maximum length (in bytes) of a tag or attribute name.
pub(crate) const DEFAULT_MAX_NAME_LENGTH: usize = 50_000;

/// Returns `true` for characters that terminate a tag name.
pub(crate) fn ends_tag_name(c: char) -> bool {
    c.is_whitespace() || c == '/' || c == '>'
}

/// Returns `true` for characters that terminate an attribute name.
pub(crate) fn ends_attr_name(c: char) -> bool {
    ends_tag_name(c) || c == '='
}

/// Cursor state for a single parse.
pub(crate) struct ParserInput<'a> {
    /// The source text.
    input: &'a str,

    /// Current byte offset in `input`. Always on a char boundary.
    pos: usize,

    /// Current line number (1-based).
    line: u32,

    /// Current column number (1-based, in characters).
    column: u32,

    /// Current tag nesting depth.
    depth: u32,

    /// Maximum allowed nesting depth.
    max_depth: u32,

    /// Maximum allowed name length in bytes.
    max_name_length: usize,
}

impl<'a> ParserInput<'a> {
    /// Creates a cursor at the start of `input` with default limits.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            column: 1,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
        }
    }

    /// Sets the maximum nesting depth.
    pub fn set_max_depth(&mut self, max: u32) {
        self.max_depth = max;
    }

    /// Sets the maximum name length.
    pub fn set_max_name_length(&mut self, max: usize) {
        self.max_name_length = max;
    }

    // -- Depth tracking --

    /// Increments the nesting depth. Returns an error if the limit is exceeded.
    pub fn increment_depth(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(self.fatal(format!(
                "maximum nesting depth exceeded ({})",
                self.max_depth
            )));
        }
        Ok(())
    }

    /// Decrements the nesting depth (saturating at 0).
    pub fn decrement_depth(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    // -- Position queries --

    /// Returns the current source location.
    pub fn location(&self) -> SourceLocation {
        SourceLocation {
            line: self.line,
            column: self.column,
            byte_offset: self.pos,
        }
    }

    /// Returns `true` if all input has been consumed.
    pub fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Returns the unconsumed input.
    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    // -- Peek operations --

    /// Returns the character at the cursor without consuming it.
    pub fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Returns `true` if the remaining input starts with `s`.
    pub fn looking_at(&self, s: &str) -> bool {
        self.remaining().starts_with(s)
    }

    // -- Advance operations --

    /// Advances past one character, updating line/column.
    pub fn advance_char(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.pos += ch.len_utf8();
    }

    /// Advances past `s`, which must be what [`looking_at`](Self::looking_at)
    /// just matched.
    pub fn advance_str(&mut self, s: &str) {
        debug_assert!(self.looking_at(s));
        for ch in s.chars() {
            self.advance_char(ch);
        }
    }

    /// Consumes `expected` or fails with `message`.
    pub fn expect_char(&mut self, expected: char, message: &str) -> Result<(), ParseError> {
        match self.peek_char() {
            Some(c) if c == expected => {
                self.advance_char(c);
                Ok(())
            }
            _ => Err(self.fatal(message)),
        }
    }

    // -- Scanning --

    /// Consumes characters up to (not including) the first one matching
    /// `stop`, or to end of input, and returns the consumed slice.
    pub fn take_until(&mut self, stop: impl Fn(char) -> bool) -> &'a str {
        let rest = self.remaining();
        let len = rest.find(stop).unwrap_or(rest.len());
        let run = &rest[..len];
        for ch in run.chars() {
            self.advance_char(ch);
        }
        run
    }

    /// Skips whitespace characters. Returns `true` if any were consumed.
    pub fn skip_whitespace(&mut self) -> bool {
        !self.take_until(|c| !c.is_whitespace()).is_empty()
    }

    // -- Name parsing --

    /// Lexes a name that runs until `stop` matches. `what` names the
    /// production for the error message.
    pub fn parse_name(
        &mut self,
        stop: impl Fn(char) -> bool,
        what: &str,
    ) -> Result<&'a str, ParseError> {
        let start = self.location();
        let name = self.take_until(stop);
        if name.is_empty() {
            return Err(ParseError::new(
                format!("expected {what} at offset {}", start.byte_offset),
                start,
            ));
        }
        if name.len() > self.max_name_length {
            return Err(ParseError::new(
                format!(
                    "name length ({}) exceeds maximum ({})",
                    name.len(),
                    self.max_name_length
                ),
                start,
            ));
        }
        Ok(name)
    }

    // -- Errors --

    /// Creates a `ParseError` at the current location.
    pub fn fatal(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.location())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_location_tracks_lines_and_chars() {
        let mut input = ParserInput::new("ab\nçd");
        let run = input.take_until(|c| c == 'd');
        assert_eq!(run, "ab\nç");
        assert_eq!(
            input.location(),
            SourceLocation {
                line: 2,
                column: 2,
                byte_offset: 5,
            }
        );
        assert_eq!(input.peek_char(), Some('d'));
    }

    #[test]
    fn test_take_until_end_of_input() {
        let mut input = ParserInput::new("no stop here");
        assert_eq!(input.take_until(|c| c == '<'), "no stop here");
        assert!(input.at_end());
        assert_eq!(input.take_until(|c| c == '<'), "");
    }

    #[test]
    fn test_skip_whitespace_unicode() {
        let mut input = ParserInput::new(" \t\n\u{3000}x");
        assert!(input.skip_whitespace());
        assert_eq!(input.peek_char(), Some('x'));
        assert!(!input.skip_whitespace());
    }

    #[test]
    fn test_parse_name_stops() {
        let mut input = ParserInput::new("voice name=\"x\"");
        assert_eq!(input.parse_name(ends_tag_name, "tag name").unwrap(), "voice");
        input.skip_whitespace();
        assert_eq!(
            input.parse_name(ends_attr_name, "attribute name").unwrap(),
            "name"
        );
        assert_eq!(input.peek_char(), Some('='));
    }

    #[test]
    fn test_parse_name_empty_is_error() {
        let mut input = ParserInput::new("/>");
        let err = input.parse_name(ends_tag_name, "tag name").unwrap_err();
        assert_eq!(err.message, "expected tag name at offset 0");
        assert_eq!(err.location.byte_offset, 0);
    }

    #[test]
    fn test_parse_name_too_long() {
        let mut input = ParserInput::new("abcdef>");
        input.set_max_name_length(3);
        let err = input.parse_name(ends_tag_name, "tag name").unwrap_err();
        assert!(err.message.contains("exceeds maximum (3)"));
    }

    #[test]
    fn test_depth_limit() {
        let mut input = ParserInput::new("");
        input.set_max_depth(2);
        input.increment_depth().unwrap();
        input.increment_depth().unwrap();
        assert!(input.increment_depth().is_err());
        input.decrement_depth();
        input.decrement_depth();
        input.decrement_depth();
        input.decrement_depth();
        input.increment_depth().unwrap();
    }

    #[test]
    fn test_expect_char() {
        let mut input = ParserInput::new("=x");
        input.expect_char('=', "expected '='").unwrap();
        let err = input.expect_char('=', "expected '='").unwrap_err();
        assert_eq!(err.message, "expected '='");
        assert_eq!(err.location.column, 2);
    }
}
