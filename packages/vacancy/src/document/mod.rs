//! Document tree and XML serializer.
//!
//! The tree is an owned hierarchy of [`Element`]s under a single `Envelope`
//! root. Elements are addressed by [`NodePath`], a list of child indices,
//! which stays valid because the tree is append-only.

mod node;
mod render;
mod tree;

pub use node::{Attribute, Content, Element, NodePath, Scalar};
pub use render::{escape_attribute, escape_text, render_fragment, XML_DECLARATION};
pub use tree::{Document, ROOT_TAG};
