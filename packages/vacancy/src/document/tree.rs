//! The document: a single `Envelope` root and path-based mutation.

use serde::Serialize;

use super::node::{Content, Element, NodePath};
use super::render::render_document;
use crate::error::PrecedenceError;

/// Tag name of the document root.
pub const ROOT_TAG: &str = "Envelope";

/// An in-memory vacancy document rooted at `Envelope`.
///
/// The tree only grows: elements are appended, never removed or reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Create a document holding an empty `Envelope` with namespace and
    /// schema version attributes.
    #[must_use]
    pub fn new(xmlns: &str, version: &str) -> Self {
        Self {
            root: Element::container(ROOT_TAG)
                .with_attribute("xmlns", xmlns)
                .with_attribute("version", version),
        }
    }

    /// The `Envelope` element.
    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Resolve a path to an element.
    #[must_use]
    pub fn get(&self, path: &NodePath) -> Option<&Element> {
        path.indices()
            .iter()
            .try_fold(&self.root, |element, &index| element.children().get(index))
    }

    fn get_mut(&mut self, path: &NodePath) -> Option<&mut Element> {
        path.indices()
            .iter()
            .try_fold(&mut self.root, |element, &index| match &mut element.content {
                Content::Children(children) => children.get_mut(index),
                _ => None,
            })
    }

    /// Append `child` as the last child of the element at `parent`.
    ///
    /// Returns the path of the appended element.
    pub fn append(
        &mut self,
        parent: &NodePath,
        child: Element,
    ) -> Result<NodePath, PrecedenceError> {
        let element = self
            .get_mut(parent)
            .ok_or_else(|| PrecedenceError::DanglingPath {
                path: parent.to_string(),
            })?;

        match &mut element.content {
            Content::Children(children) => {
                children.push(child);
                Ok(parent.child(children.len() - 1))
            }
            _ => Err(PrecedenceError::NotAContainer {
                tag: element.name.clone(),
            }),
        }
    }

    /// Total number of elements, including the root.
    #[must_use]
    pub fn element_count(&self) -> usize {
        fn count(element: &Element) -> usize {
            1 + element.children().iter().map(count).sum::<usize>()
        }
        count(&self.root)
    }

    /// Render the document as XML, indenting nested elements with `indent`.
    ///
    /// An empty `indent` produces single-line output.
    #[must_use]
    pub fn render(&self, indent: &str) -> String {
        render_document(&self.root, indent)
    }

    /// The tree as plain nested JSON records.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> Document {
        Document::new("http://arbetsformedlingen.se/LedigtArbete", "0.52")
    }

    #[test]
    fn test_new_document_has_envelope() {
        let doc = document();
        assert_eq!(doc.root().name, ROOT_TAG);
        assert_eq!(doc.root().attribute("version").unwrap().to_string(), "0.52");
        assert!(doc.root().children().is_empty());
        assert_eq!(doc.element_count(), 1);
    }

    #[test]
    fn test_append_returns_child_path() {
        let mut doc = document();
        let first = doc.append(&NodePath::root(), Element::empty("Sender")).unwrap();
        let packet = doc
            .append(&NodePath::root(), Element::container("Packet"))
            .unwrap();
        let payload = doc.append(&packet, Element::container("Payload")).unwrap();

        assert_eq!(first.indices(), &[0]);
        assert_eq!(packet.indices(), &[1]);
        assert_eq!(payload.indices(), &[1, 0]);
        assert_eq!(doc.get(&payload).unwrap().name, "Payload");
        assert_eq!(doc.element_count(), 4);
    }

    #[test]
    fn test_append_to_leaf_fails() {
        let mut doc = document();
        let leaf = doc
            .append(&NodePath::root(), Element::leaf("NumberToFill", 1_i64))
            .unwrap();
        let err = doc.append(&leaf, Element::empty("X")).unwrap_err();
        assert_eq!(
            err,
            PrecedenceError::NotAContainer {
                tag: "NumberToFill".to_string()
            }
        );
    }

    #[test]
    fn test_append_to_missing_path_fails() {
        let mut doc = document();
        let err = doc
            .append(&NodePath::root().child(7), Element::empty("X"))
            .unwrap_err();
        assert!(matches!(err, PrecedenceError::DanglingPath { .. }));
    }

    #[test]
    fn test_to_json() {
        let doc = document();
        let json = doc.to_json().unwrap();
        assert_eq!(json["name"], "Envelope");
        assert_eq!(json["attributes"][0]["name"], "xmlns");
        assert_eq!(json["attributes"][1]["value"], "0.52");
    }
}
