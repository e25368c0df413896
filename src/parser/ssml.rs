//! Core SSML parser.
//!
//! A hand-rolled recursive descent parser over the grammar:
//!
//! ```text
//! document   := ws* element ws*
//! element    := '<' ws* tagname ws* attrs ws* ( '/>' | '>' children )
//! children   := (element | text)* closetag
//! closetag   := '</' ws* tagname ws* '>'
//! attrs      := (attr ws*)*
//! attr       := name ws* '=' ws* '"' value '"'
//! text       := any run of characters not containing '<'
//! ```
//!
//! Whitespace is only skipped inside tag syntax and around the root. Text
//! between tags is captured verbatim.

use tracing::{debug, trace};

use crate::error::{ParseError, SourceLocation, TagMismatch};
use crate::tree::{Node, Tag};
use crate::util::unescape;

use super::input::{ends_attr_name, ends_tag_name, ParserInput};
use super::ParseOptions;

/// The core SSML parser.
pub(crate) struct SsmlParser<'a> {
    /// Cursor over the borrowed source text.
    input: ParserInput<'a>,
    /// Parser options.
    options: &'a ParseOptions,
}

impl<'a> SsmlParser<'a> {
    pub fn new(input: &'a str, options: &'a ParseOptions) -> Self {
        let mut pi = ParserInput::new(input);
        pi.set_max_depth(options.max_depth);
        pi.set_max_name_length(options.max_name_length);
        Self { input: pi, options }
    }

    /// Parses the whole input as a single root element.
    ///
    /// When `required_root` is set, the root is checked against it once the
    /// grammar has accepted the document.
    pub fn parse(&mut self, required_root: Option<&str>) -> Result<Node, ParseError> {
        self.input.skip_whitespace();
        if self.input.peek_char() != Some('<') {
            return Err(self.input.fatal("SSML must start with an opening tag"));
        }

        let root_location = self.input.location();
        let root = self.parse_element()?;

        self.input.skip_whitespace();
        if !self.input.at_end() {
            return Err(self.input.fatal("extra content after root element"));
        }

        if let Some(expected) = required_root {
            if root.name() != Some(expected) {
                return Err(ParseError::new(
                    format!("root element must be <{expected}>"),
                    root_location,
                ));
            }
        }

        Ok(root)
    }

    // --- Elements ---

    fn parse_element(&mut self) -> Result<Node, ParseError> {
        self.input.increment_depth()?;
        self.input.expect_char('<', "expected '<'")?;
        self.input.skip_whitespace();
        let name = self.input.parse_name(ends_tag_name, "tag name")?;
        let mut tag = Tag::new(name);
        self.input.skip_whitespace();
        self.parse_attributes(&mut tag)?;
        self.input.skip_whitespace();

        if self.input.looking_at("/>") {
            self.input.advance_str("/>");
            trace!(tag = name, "self-closing tag");
        } else if self.input.looking_at(">") {
            self.input.advance_str(">");
            trace!(tag = name, "open tag");
            tag.children = self.parse_children(name)?;
            trace!(tag = name, children = tag.children.len(), "close tag");
        } else {
            return Err(self.input.fatal("malformed tag: expected '>' or '/>'"));
        }

        self.input.decrement_depth();
        Ok(Node::Tag(tag))
    }

    // --- Attributes ---

    fn parse_attributes(&mut self, tag: &mut Tag) -> Result<(), ParseError> {
        loop {
            self.input.skip_whitespace();
            match self.input.peek_char() {
                None | Some('/' | '>') => return Ok(()),
                Some(_) => {}
            }

            let start = self.input.location();
            let name = self.input.parse_name(ends_attr_name, "attribute name")?;
            self.input.skip_whitespace();
            self.input
                .expect_char('=', "expected '=' after attribute name")?;
            self.input.skip_whitespace();
            let value = self.parse_attribute_value()?;

            let is_new = tag.attribute(name).is_none();
            if is_new && tag.attributes.len() >= self.options.max_attributes as usize {
                return Err(ParseError::new(
                    format!(
                        "too many attributes on <{}> (maximum {})",
                        tag.name, self.options.max_attributes
                    ),
                    start,
                ));
            }
            if tag.set_attribute(name, value).is_some() {
                debug!(tag = %tag.name, attribute = name, "duplicate attribute, keeping last value");
            }
        }
    }

    fn parse_attribute_value(&mut self) -> Result<String, ParseError> {
        match self.input.peek_char() {
            None => return Err(self.input.fatal("expected attribute value")),
            Some('"') => self.input.advance_char('"'),
            Some(_) => {
                return Err(self
                    .input
                    .fatal("expected double quote for attribute value"))
            }
        }

        let start = self.input.location();
        let raw = self.input.take_until(|c| c == '"');
        if self.input.at_end() {
            return Err(ParseError::new(
                format!(
                    "attribute value not closed starting at offset {}",
                    start.byte_offset
                ),
                start,
            ));
        }
        self.input.advance_char('"');
        self.check_text_length(raw, "attribute value", start)?;
        Ok(unescape(raw).into_owned())
    }

    // --- Content ---

    fn parse_children(&mut self, tag_name: &str) -> Result<Vec<Node>, ParseError> {
        let mut children = Vec::new();
        loop {
            if self.input.at_end() {
                return Err(self
                    .input
                    .fatal(format!("missing closing tag for <{tag_name}>")));
            }

            if self.input.looking_at("</") {
                self.parse_closing_tag(tag_name)?;
                return Ok(children);
            }

            if self.input.looking_at("<") {
                children.push(self.parse_element()?);
            } else {
                children.push(self.parse_text()?);
            }
        }
    }

    fn parse_closing_tag(&mut self, tag_name: &str) -> Result<(), ParseError> {
        let start = self.input.location();
        self.input.advance_str("</");
        self.input.skip_whitespace();
        let closing = self.input.parse_name(ends_tag_name, "tag name")?;
        self.input.skip_whitespace();
        self.input
            .expect_char('>', "expected '>' at end of closing tag")?;

        if closing != tag_name {
            return Err(ParseError {
                message: format!(
                    "mismatched closing tag: expected </{tag_name}> but found </{closing}>"
                ),
                location: start,
                mismatch: Some(TagMismatch {
                    expected: tag_name.to_string(),
                    found: closing.to_string(),
                }),
            });
        }
        Ok(())
    }

    // --- Text ---

    fn parse_text(&mut self) -> Result<Node, ParseError> {
        let start = self.input.location();
        let raw = self.input.take_until(|c| c == '<');
        self.check_text_length(raw, "text", start)?;
        Ok(Node::text(unescape(raw)))
    }

    fn check_text_length(
        &self,
        raw: &str,
        what: &str,
        start: SourceLocation,
    ) -> Result<(), ParseError> {
        if raw.len() > self.options.max_text_length {
            return Err(ParseError::new(
                format!(
                    "{what} length ({}) exceeds maximum ({})",
                    raw.len(),
                    self.options.max_text_length
                ),
                start,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tree::Attribute;
    use pretty_assertions::assert_eq;

    fn parse_any(input: &str) -> Result<Node, ParseError> {
        let options = ParseOptions::default();
        SsmlParser::new(input, &options).parse(None)
    }

    fn tag(node: &Node) -> &Tag {
        node.as_tag()
            .unwrap_or_else(|| panic!("expected a tag, got {node:?}"))
    }

    #[test]
    fn test_parse_empty_element() {
        let root = parse_any("<speak></speak>").unwrap();
        assert_eq!(root, Node::Tag(Tag::new("speak")));
    }

    #[test]
    fn test_parse_self_closing_any_name() {
        let root = parse_any("<anything/>").unwrap();
        assert_eq!(root, Node::Tag(Tag::new("anything")));
    }

    #[test]
    fn test_parse_whitespace_inside_tag_syntax() {
        let root = parse_any("<  speak \n version = \"1.1\"\t>x</ speak >").unwrap();
        let speak = tag(&root);
        assert_eq!(speak.name, "speak");
        assert_eq!(speak.attributes, vec![Attribute::new("version", "1.1")]);
        assert_eq!(speak.children, vec![Node::text("x")]);
    }

    #[test]
    fn test_parse_self_closing_with_space_before_slash() {
        let root = parse_any("<speak><break time=\"1s\" /></speak>").unwrap();
        let brk = tag(&tag(&root).children[0]);
        assert_eq!(brk.name, "break");
        assert_eq!(brk.attribute("time"), Some("1s"));
        assert!(brk.is_empty());
    }

    #[test]
    fn test_parse_attributes_without_separating_whitespace() {
        let root = parse_any("<p a=\"1\"b=\"2\"></p>").unwrap();
        let names: Vec<_> = tag(&root).attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_parse_duplicate_attribute_last_wins_first_position() {
        let root = parse_any("<p a=\"1\" b=\"2\" a=\"3\"/>").unwrap();
        assert_eq!(
            tag(&root).attributes,
            vec![Attribute::new("a", "3"), Attribute::new("b", "2")]
        );
    }

    #[test]
    fn test_parse_attribute_value_decoded() {
        let root = parse_any("<sub alias=\"A &amp; B &lt;C&gt;\"/>").unwrap();
        assert_eq!(tag(&root).attribute("alias"), Some("A & B <C>"));
    }

    #[test]
    fn test_parse_attribute_value_may_contain_markup_chars() {
        let root = parse_any("<p x=\"a>b<c/d\"/>").unwrap();
        assert_eq!(tag(&root).attribute("x"), Some("a>b<c/d"));
    }

    #[test]
    fn test_parse_empty_attribute_value() {
        let root = parse_any("<p x=\"\"/>").unwrap();
        assert_eq!(tag(&root).attribute("x"), Some(""));
    }

    #[test]
    fn test_parse_text_decoded() {
        let root = parse_any("<speak>1 &lt; 2 &amp;&amp; 3 &gt; 2</speak>").unwrap();
        assert_eq!(tag(&root).children, vec![Node::text("1 < 2 && 3 > 2")]);
    }

    #[test]
    fn test_parse_adjacent_tags_have_no_empty_text() {
        let root = parse_any("<speak><a/><b></b></speak>").unwrap();
        assert_eq!(tag(&root).children.len(), 2);
        assert!(tag(&root).children.iter().all(Node::is_tag));
    }

    #[test]
    fn test_parse_mixed_content_preserves_spacing() {
        let root = parse_any("<speak>  Hello <b>big</b>\n world  </speak>").unwrap();
        let children = &tag(&root).children;
        assert_eq!(children.len(), 3);
        assert_eq!(children[0], Node::text("  Hello "));
        assert_eq!(children[2], Node::text("\n world  "));
    }

    #[test]
    fn test_parse_multibyte_text_and_names() {
        let root = parse_any("<speak><größe wert=\"ü\">日本語</größe></speak>").unwrap();
        let inner = tag(&tag(&root).children[0]);
        assert_eq!(inner.name, "größe");
        assert_eq!(inner.attribute("wert"), Some("ü"));
        assert_eq!(inner.children, vec![Node::text("日本語")]);
    }

    #[test]
    fn test_error_single_quoted_attribute() {
        let err = parse_any("<p a='1'/>").unwrap_err();
        assert_eq!(err.message, "expected double quote for attribute value");
        assert_eq!(err.location.byte_offset, 5);
    }

    #[test]
    fn test_error_missing_equals() {
        let err = parse_any("<p a \"1\"/>").unwrap_err();
        assert_eq!(err.message, "expected '=' after attribute name");
    }

    #[test]
    fn test_error_attribute_value_at_end_of_input() {
        let err = parse_any("<p a=").unwrap_err();
        assert_eq!(err.message, "expected attribute value");
    }

    #[test]
    fn test_error_unterminated_attribute_value() {
        let err = parse_any("<p a=\"open>text</p>").unwrap_err();
        assert_eq!(err.message, "attribute value not closed starting at offset 6");
        assert_eq!(err.location.byte_offset, 6);
    }

    #[test]
    fn test_error_empty_tag_name() {
        let err = parse_any("< >").unwrap_err();
        assert_eq!(err.message, "expected tag name at offset 2");
    }

    #[test]
    fn test_error_empty_attribute_name() {
        let err = parse_any("<p =\"1\"/>").unwrap_err();
        assert_eq!(err.message, "expected attribute name at offset 3");
    }

    #[test]
    fn test_error_malformed_tag_end() {
        let err = parse_any("<p").unwrap_err();
        assert_eq!(err.message, "malformed tag: expected '>' or '/>'");
        let err = parse_any("<p /x>").unwrap_err();
        assert_eq!(err.message, "malformed tag: expected '>' or '/>'");
    }

    #[test]
    fn test_error_closing_tag_without_gt() {
        let err = parse_any("<p></p x>").unwrap_err();
        assert_eq!(err.message, "expected '>' at end of closing tag");
    }

    #[test]
    fn test_error_mismatched_closing_tag() {
        let err = parse_any("<a><b></a></b>").unwrap_err();
        assert_eq!(
            err.message,
            "mismatched closing tag: expected </b> but found </a>"
        );
        assert_eq!(err.location.byte_offset, 6);
        assert_eq!(
            err.mismatch,
            Some(TagMismatch {
                expected: "b".to_string(),
                found: "a".to_string(),
            })
        );
    }

    #[test]
    fn test_error_closing_tag_is_case_sensitive() {
        let err = parse_any("<Speak></speak>").unwrap_err();
        assert!(err.mismatch.is_some());
    }

    #[test]
    fn test_error_missing_closing_tag() {
        let err = parse_any("<speak><p>text").unwrap_err();
        assert_eq!(err.message, "missing closing tag for <p>");
        assert_eq!(err.location.byte_offset, 14);
    }

    #[test]
    fn test_error_extra_content() {
        let err = parse_any("<speak></speak> trailing").unwrap_err();
        assert_eq!(err.message, "extra content after root element");
        assert_eq!(err.location.byte_offset, 16);
        assert!(parse_any("<speak></speak><speak></speak>").is_err());
    }

    #[test]
    fn test_error_location_line_column() {
        let err = parse_any("<speak>\n  <p>\n</speak>").unwrap_err();
        assert_eq!(err.location.line, 3);
        assert_eq!(err.location.column, 1);
    }

    #[test]
    fn test_required_root_checked_after_grammar() {
        let options = ParseOptions::default();
        // Grammar errors win over the root check.
        let err = SsmlParser::new("<foo>", &options)
            .parse(Some("speak"))
            .unwrap_err();
        assert_eq!(err.message, "missing closing tag for <foo>");

        let err = SsmlParser::new("  <foo/>", &options)
            .parse(Some("speak"))
            .unwrap_err();
        assert_eq!(err.message, "root element must be <speak>");
        assert_eq!(err.location.byte_offset, 2);
    }
}
