//! Utility modules for ssmloxide.
//!
//! Contains the entity codec shared by the parser and the serializer.

pub mod entities;

pub use entities::{escape, unescape};
