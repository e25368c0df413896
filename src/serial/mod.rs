//! SSML serialization.
//!
//! This module writes a [`Node`](crate::tree::Node) tree back to markup
//! text. Output is compact: nothing is inserted beyond what the tree holds,
//! so text-node whitespace is the only whitespace in the result.

pub mod ssml;

pub use ssml::{serialize, serialize_into, serialize_with_options, SerializeOptions};

pub(crate) use ssml::write_tag;
