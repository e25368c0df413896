//! Node type definitions.
//!
//! `Node` is the closed sum of everything that can appear in an SSML tree:
//! a run of decoded text, or a tag owning its attributes and children.

use std::fmt;
use std::str::FromStr;

use super::Tag;
use crate::error::ParseError;

/// A node in an SSML tree.
///
/// Nodes own their children outright; there are no parent or sibling links,
/// so a tree is always acyclic and can be cloned, compared, or sent across
/// threads like any other value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A text node containing spoken text.
    Text {
        /// The text content, already decoded (`&lt;` stored as `<`).
        content: String,
    },

    /// A tag such as `<voice name="Joanna">...</voice>` or `<break/>`.
    Tag(Tag),
}

impl Node {
    /// Parses an SSML document whose root must be `<speak>`.
    ///
    /// Shorthand for [`crate::parser::parse_ssml`].
    ///
    /// # Errors
    ///
    /// Returns `ParseError` on any grammar violation or if the root element
    /// is not `speak`.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        crate::parser::parse_ssml(input)
    }

    /// Creates a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// Wraps a tag as a node. Same as `Node::from(tag)`.
    pub fn tag(tag: Tag) -> Self {
        Self::Tag(tag)
    }

    /// Returns `true` for text nodes.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    /// Returns `true` for tag nodes.
    #[must_use]
    pub fn is_tag(&self) -> bool {
        matches!(self, Self::Tag(_))
    }

    /// Returns the text content if this is a text node.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { content } => Some(content),
            Self::Tag(_) => None,
        }
    }

    /// Returns the tag if this is a tag node.
    #[must_use]
    pub fn as_tag(&self) -> Option<&Tag> {
        match self {
            Self::Tag(tag) => Some(tag),
            Self::Text { .. } => None,
        }
    }

    /// Returns the tag mutably if this is a tag node.
    pub fn as_tag_mut(&mut self) -> Option<&mut Tag> {
        match self {
            Self::Tag(tag) => Some(tag),
            Self::Text { .. } => None,
        }
    }

    /// Returns the tag name, or `None` for text nodes.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.as_tag().map(|tag| tag.name.as_str())
    }

    /// Concatenates all descendant text in document order.
    ///
    /// This is the text a synthesizer would speak with every tag stripped.
    /// Whitespace is reproduced exactly as it appears in the text nodes.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in self.descendants() {
            if let Self::Text { content } = node {
                out.push_str(content);
            }
        }
        out
    }

    /// Returns a pre-order iterator over this node and all its descendants.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

impl From<Tag> for Node {
    fn from(tag: Tag) -> Self {
        Self::Tag(tag)
    }
}

impl FromStr for Node {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::serial::serialize(self))
    }
}

/// Pre-order, depth-first iterator returned by [`Node::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Node::Tag(tag) = node {
            self.stack.extend(tag.children.iter().rev());
        }
        Some(node)
    }
}
