//! Tree nodes: elements, their attributes and content.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar text or attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(i64),
    Text(String),
}

impl Scalar {
    /// True for an empty text value; numbers and booleans always render.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for Scalar {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u8> for Scalar {
    fn from(value: u8) -> Self {
        Self::Number(i64::from(value))
    }
}

/// A named attribute on an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub value: Scalar,
}

/// What an element holds besides its attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Content {
    /// Nothing; renders self-closing. Used for attribute-only nodes and
    /// marker elements such as `<FullTime/>`.
    Empty,
    /// A scalar value, e.g. `<PacketId>1</PacketId>`.
    Text(Scalar),
    /// Ordered child elements. Order is significant.
    Children(Vec<Element>),
}

/// One XML element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    pub content: Content,
}

impl Element {
    /// Leaf element holding a scalar value.
    #[must_use]
    pub fn leaf(name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            content: Content::Text(value.into()),
        }
    }

    /// Container element with no children yet.
    #[must_use]
    pub fn container(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            content: Content::Children(Vec::new()),
        }
    }

    /// Element with neither text nor children.
    #[must_use]
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            content: Content::Empty,
        }
    }

    /// Append an attribute. Attributes keep insertion order.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.attributes.push(Attribute {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Append an attribute only when a value is present.
    #[must_use]
    pub fn with_optional_attribute<V: Into<Scalar>>(
        self,
        name: impl Into<String>,
        value: Option<V>,
    ) -> Self {
        match value {
            Some(value) => self.with_attribute(name, value),
            None => self,
        }
    }

    /// Append a child, turning an empty element into a container.
    ///
    /// Fragments are assembled inside this crate only, so a leaf never
    /// receives children.
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        debug_assert!(
            !matches!(self.content, Content::Text(_)),
            "<{}> is a leaf",
            self.name
        );
        if let Content::Children(children) = &mut self.content {
            children.push(child);
        } else {
            self.content = Content::Children(vec![child]);
        }
        self
    }

    /// Append a child only when present.
    #[must_use]
    pub fn with_optional_child(self, child: Option<Element>) -> Self {
        match child {
            Some(child) => self.with_child(child),
            None => self,
        }
    }

    /// Look up an attribute value by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Scalar> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| &a.value)
    }

    /// The scalar value of a leaf.
    #[must_use]
    pub fn text(&self) -> Option<&Scalar> {
        match &self.content {
            Content::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Child elements; empty for leaves and attribute nodes.
    #[must_use]
    pub fn children(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    /// First child with the given tag name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children().iter().find(|c| c.name == name)
    }

    /// All children with the given tag name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children().iter().filter(move |c| c.name == name)
    }

    /// Follow a `/`-separated path of child tag names, taking the first match
    /// at each step.
    #[must_use]
    pub fn find_by_path(&self, path: &str) -> Option<&Element> {
        path.split('/')
            .try_fold(self, |current, part| current.child(part))
    }

    /// Whether this element can hold children.
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self.content, Content::Children(_))
    }
}

/// Address of an element as child indices from the root.
///
/// Nodes are never removed, so a path stays valid for the lifetime of its
/// document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// Path of the root element.
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path of the child at `index` below this one.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Child indices from the root.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Nesting depth; the root is 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("/")?;
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf() {
        let el = Element::leaf("PacketId", 1_i64);
        assert_eq!(el.text(), Some(&Scalar::Number(1)));
        assert!(el.children().is_empty());
        assert!(!el.is_container());
    }

    #[test]
    fn test_empty_becomes_container_on_child() {
        let el = Element::empty("Schedule").with_child(Element::empty("FullTime"));
        assert!(el.is_container());
        assert_eq!(el.children().len(), 1);
    }

    #[test]
    fn test_attributes_keep_insertion_order() {
        let el = Element::empty("Sender")
            .with_attribute("id", "12345678")
            .with_attribute("email", "a@b.com")
            .with_optional_attribute::<&str>("skipped", None);
        let names: Vec<&str> = el.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["id", "email"]);
        assert_eq!(el.attribute("email"), Some(&Scalar::from("a@b.com")));
    }

    #[test]
    fn test_find_by_path() {
        let el = Element::container("PostDetail").with_child(
            Element::container("EndDate").with_child(Element::leaf("Date", "2018-12-01")),
        );
        let date = el.find_by_path("EndDate/Date").unwrap();
        assert_eq!(date.text().unwrap().to_string(), "2018-12-01");
        assert!(el.find_by_path("StartDate/Date").is_none());
    }

    #[test]
    fn test_node_path() {
        let path = NodePath::root().child(2).child(1);
        assert_eq!(path.indices(), &[2, 1]);
        assert_eq!(path.depth(), 2);
        assert_eq!(path.to_string(), "/2/1");
        assert_eq!(NodePath::root().to_string(), "/");
    }

    #[test]
    fn test_serializes_as_plain_records() {
        let el = Element::container("Payload").with_child(Element::leaf("NumberToFill", 3_i64));
        let json = serde_json::to_value(&el).unwrap();
        assert_eq!(json["name"], "Payload");
        assert_eq!(json["content"]["children"][0]["content"]["text"], 3);
        assert!(json.get("attributes").is_none());
    }
}
