//! SSML serializer.
//!
//! Serializes a `Node` tree into markup text with a pre-order walk.

use crate::tree::{Node, Tag};
use crate::util::entities::write_escaped;

/// Options controlling serialization output.
///
/// # Examples
///
/// ```
/// use ssmloxide::Node;
/// use ssmloxide::serial::{serialize_with_options, SerializeOptions};
///
/// let doc = Node::parse("<speak>a<break/>b</speak>").unwrap();
/// let opts = SerializeOptions::default().collapse_empty(true);
/// assert_eq!(serialize_with_options(&doc, &opts), "<speak>a<break/>b</speak>");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SerializeOptions {
    /// Whether tags without children are written as `<name/>` instead of
    /// `<name></name>`. Defaults to `false`.
    pub collapse_empty: bool,
}

impl SerializeOptions {
    /// Enables or disables the self-closing form for childless tags.
    ///
    /// The tree does not record whether a tag was self-closed in the source,
    /// so this applies to every childless tag alike.
    #[must_use]
    pub fn collapse_empty(mut self, yes: bool) -> Self {
        self.collapse_empty = yes;
        self
    }
}

/// Serializes a node to a string.
///
/// Every tag is written with an explicit closing tag, including tags that
/// were self-closed in the source.
///
/// # Examples
///
/// ```
/// use ssmloxide::Node;
/// use ssmloxide::serial::serialize;
///
/// let doc = Node::parse("<speak>a<break/>b</speak>").unwrap();
/// assert_eq!(serialize(&doc), "<speak>a<break></break>b</speak>");
/// ```
#[must_use]
pub fn serialize(node: &Node) -> String {
    serialize_with_options(node, &SerializeOptions::default())
}

/// Serializes a node to a string with the given options.
#[must_use]
pub fn serialize_with_options(node: &Node, options: &SerializeOptions) -> String {
    let mut output = String::new();
    serialize_into(node, &mut output, options);
    output
}

/// Appends the serialization of `node` to an existing buffer.
pub fn serialize_into(node: &Node, out: &mut String, options: &SerializeOptions) {
    match node {
        Node::Text { content } => write_escaped(out, content),
        Node::Tag(tag) => write_tag(out, tag, options),
    }
}

pub(crate) fn write_tag(out: &mut String, tag: &Tag, options: &SerializeOptions) {
    out.push('<');
    out.push_str(&tag.name);

    for attr in &tag.attributes {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        write_escaped(out, &attr.value);
        out.push('"');
    }

    if options.collapse_empty && tag.children.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in &tag.children {
        serialize_into(child, out, options);
    }
    out.push_str("</");
    out.push_str(&tag.name);
    out.push('>');
}
