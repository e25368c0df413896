//! # ssmloxide
//!
//! A small, strict parser and serializer for SSML (Speech Synthesis Markup
//! Language), for pipelines that need to inspect or rewrite markup before it
//! reaches a speech synthesizer.
//!
//! Tag names and attributes are treated as opaque strings; there is no
//! knowledge of the SSML vocabulary beyond the requirement that documents
//! are rooted at `<speak>`. Only the `&lt;`, `&gt;` and `&amp;` entities are
//! understood.
//!
//! ## Quick Start
//!
//! ```
//! use ssmloxide::{parse_ssml, serialize};
//!
//! let mut root = parse_ssml("<speak><voice name=\"Joanna\">Hi</voice></speak>").unwrap();
//! let speak = root.as_tag_mut().unwrap();
//! for voice in speak.child_tags_mut() {
//!     voice.set_attribute("name", "Matthew");
//! }
//! assert_eq!(serialize(&root), "<speak><voice name=\"Matthew\">Hi</voice></speak>");
//! ```

pub mod encoding;
pub mod error;
pub mod parser;
pub mod serial;
pub mod tree;
pub mod util;

// Re-export primary types at the crate root for convenience.
pub use error::{Error, ParseError, SourceLocation, TagMismatch};
pub use parser::{parse_markup, parse_ssml, parse_ssml_bytes, parse_ssml_with_options, ParseOptions};
pub use serial::{serialize, serialize_with_options, SerializeOptions};
pub use tree::{Attribute, Node, Tag};
pub use util::{escape, unescape};
