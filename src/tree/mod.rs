//! Owned SSML document tree.
//!
//! A parsed document is a plain value: a [`Node`] whose tag variant owns its
//! attributes and children directly. There is no arena and no back-links;
//! mutation is ordinary `&mut` access, and dropping the root frees
//! everything.
//!
//! Attributes are kept in a `Vec` in the order they were parsed (or
//! inserted), which makes serialization output reproducible. Keys are kept
//! unique by [`Tag::set_attribute`], which is also what the parser uses.

mod node;

pub use node::{Descendants, Node};

use std::fmt;

/// A single `name="value"` pair on a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The attribute name, e.g. `"name"` in `name="Joanna"`.
    pub name: String,
    /// The attribute value, already decoded.
    pub value: String,
}

impl Attribute {
    /// Creates an attribute.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A tag node: a name, ordered attributes, and ordered children.
///
/// A tag parsed from `<br/>` and one parsed from `<br></br>` are equal; the
/// tree does not remember which form the source used.
///
/// # Examples
///
/// ```
/// use ssmloxide::tree::{Node, Tag};
///
/// let speak = Tag::new("speak")
///     .with_child(Tag::new("voice").with_attribute("name", "Joanna").with_child(Node::text("Hi")));
/// assert_eq!(
///     ssmloxide::serial::serialize(&speak.into()),
///     "<speak><voice name=\"Joanna\">Hi</voice></speak>"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// The tag name. Never empty and never contains whitespace, `/` or `>`.
    pub name: String,
    /// Attributes in document order, with unique names.
    pub attributes: Vec<Attribute>,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

impl Tag {
    /// Creates a tag with no attributes and no children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder form of [`set_attribute`](Self::set_attribute).
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder form of [`push_child`](Self::push_child).
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.push_child(child);
        self
    }

    /// Returns the value of the named attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Sets an attribute, returning the previous value if there was one.
    ///
    /// An existing attribute keeps its position and only its value changes;
    /// a new attribute is appended after the existing ones.
    pub fn set_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        let name = name.into();
        let value = value.into();
        if let Some(existing) = self.attributes.iter_mut().find(|a| a.name == name) {
            return Some(std::mem::replace(&mut existing.value, value));
        }
        self.attributes.push(Attribute { name, value });
        None
    }

    /// Removes an attribute, returning its value. The relative order of the
    /// remaining attributes is unchanged.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let index = self.attributes.iter().position(|a| a.name == name)?;
        Some(self.attributes.remove(index).value)
    }

    /// Appends a child node.
    pub fn push_child(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Returns `true` if the tag has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Iterates over the children that are tags, skipping text.
    pub fn child_tags(&self) -> impl Iterator<Item = &Tag> {
        self.children.iter().filter_map(Node::as_tag)
    }

    /// Iterates mutably over the children that are tags, skipping text.
    pub fn child_tags_mut(&mut self) -> impl Iterator<Item = &mut Tag> {
        self.children.iter_mut().filter_map(Node::as_tag_mut)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        crate::serial::write_tag(&mut out, self, &crate::serial::SerializeOptions::default());
        f.write_str(&out)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Node {
        Tag::new("speak")
            .with_child(Node::text("Hello "))
            .with_child(
                Tag::new("emphasis")
                    .with_attribute("level", "strong")
                    .with_child(Node::text("big")),
            )
            .with_child(Tag::new("break").with_attribute("time", "300ms"))
            .with_child(Node::text(" world"))
            .into()
    }

    #[test]
    fn test_set_attribute_keeps_position() {
        let mut tag = Tag::new("prosody")
            .with_attribute("rate", "slow")
            .with_attribute("pitch", "low");
        let old = tag.set_attribute("rate", "fast");
        assert_eq!(old.as_deref(), Some("slow"));
        assert_eq!(
            tag.attributes,
            vec![Attribute::new("rate", "fast"), Attribute::new("pitch", "low")]
        );
        assert_eq!(tag.set_attribute("volume", "loud"), None);
        assert_eq!(tag.attributes.last().unwrap().name, "volume");
    }

    #[test]
    fn test_remove_attribute() {
        let mut tag = Tag::new("voice")
            .with_attribute("name", "Joanna")
            .with_attribute("gender", "female")
            .with_attribute("age", "30");
        assert_eq!(tag.remove_attribute("gender").as_deref(), Some("female"));
        assert_eq!(tag.remove_attribute("gender"), None);
        let names: Vec<_> = tag.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["name", "age"]);
    }

    #[test]
    fn test_attribute_lookup() {
        let tag = Tag::new("say-as").with_attribute("interpret-as", "digits");
        assert_eq!(tag.attribute("interpret-as"), Some("digits"));
        assert_eq!(tag.attribute("format"), None);
    }

    #[test]
    fn test_text_content_strips_markup() {
        assert_eq!(sample().text_content(), "Hello big world");
    }

    #[test]
    fn test_descendants_pre_order() {
        let root = sample();
        let visited: Vec<String> = root
            .descendants()
            .map(|n| match n {
                Node::Text { content } => format!("#{content}"),
                Node::Tag(tag) => tag.name.clone(),
            })
            .collect();
        assert_eq!(
            visited,
            ["speak", "#Hello ", "emphasis", "#big", "break", "# world"]
        );
    }

    #[test]
    fn test_child_tags_skips_text() {
        let root = sample();
        let names: Vec<_> = root
            .as_tag()
            .unwrap()
            .child_tags()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, ["emphasis", "break"]);
    }

    #[test]
    fn test_child_tags_mut_edits_in_place() {
        let mut root = sample();
        for tag in root.as_tag_mut().unwrap().child_tags_mut() {
            tag.set_attribute("x", "1");
        }
        let tag = root.as_tag().unwrap();
        assert!(tag.child_tags().all(|t| t.attribute("x") == Some("1")));
    }

    #[test]
    fn test_node_accessors() {
        let text = Node::text("hi");
        assert!(text.is_text());
        assert_eq!(text.as_text(), Some("hi"));
        assert_eq!(text.name(), None);

        let tag: Node = Tag::new("p").into();
        assert!(tag.is_tag());
        assert_eq!(tag.name(), Some("p"));
        assert!(tag.as_tag().unwrap().is_empty());
    }

    #[test]
    fn test_display_serializes() {
        assert_eq!(
            sample().to_string(),
            "<speak>Hello <emphasis level=\"strong\">big</emphasis>\
             <break time=\"300ms\"></break> world</speak>"
        );
    }

    #[test]
    fn test_trees_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Node>();
        assert_send_sync::<Tag>();
    }
}
