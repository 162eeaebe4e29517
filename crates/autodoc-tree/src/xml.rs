//! Loosely typed element tree produced by [`parse_xml`](crate::parse_xml).

use std::collections::HashMap;

/// A node in the Sphinx output tree: an element or a text leaf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum XmlNode {
    /// Element with a name, attributes and children.
    Element(XmlElement),
    /// Raw character data.
    Text(String),
}

impl XmlNode {
    /// Create a text leaf.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Return the element if this node is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }
}

impl From<XmlElement> for XmlNode {
    fn from(element: XmlElement) -> Self {
        Self::Element(element)
    }
}

/// An element of the Sphinx output tree.
///
/// The element name comes from an open vocabulary (`desc`, `desc_signature`,
/// `field_list`, ...). Only names known to the translator can be converted
/// into document nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Element name.
    pub name: String,
    /// Attributes (namespace declarations excluded).
    pub attrs: HashMap<String, String>,
    /// Child nodes in document order.
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// Create an element with no attributes and no children.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add an attribute (builder style).
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Append a child node (builder style).
    #[must_use]
    pub fn with_child(mut self, child: impl Into<XmlNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a text leaf (builder style).
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(XmlNode::text(text))
    }

    /// Get an attribute value.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Iterate over child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    /// Concatenated text of all descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        push_text(&self.children, &mut out);
        out
    }
}

fn push_text(nodes: &[XmlNode], out: &mut String) {
    for node in nodes {
        match node {
            XmlNode::Text(text) => out.push_str(text),
            XmlNode::Element(element) => push_text(&element.children, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let element = XmlElement::new("desc")
            .with_attr("ids", "module-pkg")
            .with_text("hello");

        assert_eq!(element.name, "desc");
        assert_eq!(element.attr("ids"), Some("module-pkg"));
        assert_eq!(element.attr("missing"), None);
        assert_eq!(element.children, vec![XmlNode::text("hello")]);
    }

    #[test]
    fn test_elements_skips_text() {
        let element = XmlElement::new("desc")
            .with_text("a")
            .with_child(XmlElement::new("desc_signature"))
            .with_text("b");

        let names: Vec<_> = element.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["desc_signature"]);
    }

    #[test]
    fn test_text_content() {
        let element = XmlElement::new("paragraph")
            .with_text("Returns ")
            .with_child(XmlElement::new("emphasis").with_text("a list"))
            .with_text(".");

        assert_eq!(element.text_content(), "Returns a list.");
    }
}
