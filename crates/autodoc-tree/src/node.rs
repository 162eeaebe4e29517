//! Document node vocabulary produced by translation.

use serde::Serialize;

/// Node types built from children alone (no extra data).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Block-level container.
    Block,
    /// Paragraph.
    Paragraph,
    /// Generic inline container.
    Span,
    /// Strong emphasis (bold).
    Strong,
    /// Emphasis (italic).
    Emphasis,
    /// Inline code.
    InlineCode,
    /// Preformatted code block.
    Code,
    /// List.
    List,
    /// List item.
    ListItem,
}

impl Kind {
    /// Build a node of this kind with the given children.
    #[must_use]
    pub fn node(self, children: Vec<Node>) -> Node {
        let parent = Parent { id: None, children };
        match self {
            Self::Block => Node::Block(parent),
            Self::Paragraph => Node::Paragraph(parent),
            Self::Span => Node::Span(parent),
            Self::Strong => Node::Strong(parent),
            Self::Emphasis => Node::Emphasis(parent),
            Self::InlineCode => Node::InlineCode(parent),
            Self::Code => Node::Code(parent),
            Self::List => Node::List(parent),
            Self::ListItem => Node::ListItem(parent),
        }
    }

    /// HTML element used when rendering this kind.
    #[must_use]
    pub fn html_tag(self) -> &'static str {
        match self {
            Self::Block => "div",
            Self::Paragraph => "p",
            Self::Span => "span",
            Self::Strong => "strong",
            Self::Emphasis => "em",
            Self::InlineCode => "code",
            Self::Code => "pre",
            Self::List => "ul",
            Self::ListItem => "li",
        }
    }
}

/// Admonition flavours recognised in docstrings (`.. note::` and friends).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdmonitionKind {
    Attention,
    Caution,
    Danger,
    Error,
    Hint,
    Important,
    Note,
    Tip,
    Warning,
}

impl AdmonitionKind {
    /// All kinds, in alphabetical order.
    pub const ALL: [Self; 9] = [
        Self::Attention,
        Self::Caution,
        Self::Danger,
        Self::Error,
        Self::Hint,
        Self::Important,
        Self::Note,
        Self::Tip,
        Self::Warning,
    ];

    /// Lowercase name, identical to the docutils element name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Attention => "attention",
            Self::Caution => "caution",
            Self::Danger => "danger",
            Self::Error => "error",
            Self::Hint => "hint",
            Self::Important => "important",
            Self::Note => "note",
            Self::Tip => "tip",
            Self::Warning => "warning",
        }
    }
}

/// Anchor and children shared by every non-text node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Parent {
    /// Anchor id, set when a target points at this node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Child nodes.
    pub children: Vec<Node>,
}

/// A translated document node.
///
/// Serializes in an mdast-like shape:
/// `{"type": "strong", "children": [{"type": "text", "value": "f"}]}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Text {
        value: String,
    },
    Block(Parent),
    Paragraph(Parent),
    Span(Parent),
    Strong(Parent),
    Emphasis(Parent),
    InlineCode(Parent),
    Code(Parent),
    List(Parent),
    ListItem(Parent),
    /// Section title; `depth` is 1 for a top-level section.
    Heading {
        depth: u8,
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        children: Vec<Node>,
    },
    Admonition {
        kind: AdmonitionKind,
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        children: Vec<Node>,
    },
    Link {
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        children: Vec<Node>,
    },
}

impl Node {
    /// Create a text leaf.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    /// Create a heading.
    #[must_use]
    pub fn heading(depth: u8, children: Vec<Node>) -> Self {
        Self::Heading {
            depth,
            id: None,
            children,
        }
    }

    /// Create an admonition.
    #[must_use]
    pub fn admonition(kind: AdmonitionKind, children: Vec<Node>) -> Self {
        Self::Admonition {
            kind,
            id: None,
            children,
        }
    }

    /// Create a link.
    #[must_use]
    pub fn link(url: impl Into<String>, children: Vec<Node>) -> Self {
        Self::Link {
            url: url.into(),
            id: None,
            children,
        }
    }

    /// Set the anchor id (builder style). Text leaves carry no id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.set_id(id.into());
        self
    }

    /// Set the anchor id. Returns `false` for text leaves, which carry none.
    pub fn set_id(&mut self, value: String) -> bool {
        match self {
            Self::Text { .. } => false,
            Self::Block(parent)
            | Self::Paragraph(parent)
            | Self::Span(parent)
            | Self::Strong(parent)
            | Self::Emphasis(parent)
            | Self::InlineCode(parent)
            | Self::Code(parent)
            | Self::List(parent)
            | Self::ListItem(parent) => {
                parent.id = Some(value);
                true
            }
            Self::Heading { id, .. } | Self::Admonition { id, .. } | Self::Link { id, .. } => {
                *id = Some(value);
                true
            }
        }
    }

    /// Anchor id, if any.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Text { .. } => None,
            Self::Block(parent)
            | Self::Paragraph(parent)
            | Self::Span(parent)
            | Self::Strong(parent)
            | Self::Emphasis(parent)
            | Self::InlineCode(parent)
            | Self::Code(parent)
            | Self::List(parent)
            | Self::ListItem(parent) => parent.id.as_deref(),
            Self::Heading { id, .. } | Self::Admonition { id, .. } | Self::Link { id, .. } => {
                id.as_deref()
            }
        }
    }

    /// Simple node kind, or `None` for text, headings, admonitions and links.
    #[must_use]
    pub fn kind(&self) -> Option<Kind> {
        Some(match self {
            Self::Text { .. }
            | Self::Heading { .. }
            | Self::Admonition { .. }
            | Self::Link { .. } => return None,
            Self::Block(_) => Kind::Block,
            Self::Paragraph(_) => Kind::Paragraph,
            Self::Span(_) => Kind::Span,
            Self::Strong(_) => Kind::Strong,
            Self::Emphasis(_) => Kind::Emphasis,
            Self::InlineCode(_) => Kind::InlineCode,
            Self::Code(_) => Kind::Code,
            Self::List(_) => Kind::List,
            Self::ListItem(_) => Kind::ListItem,
        })
    }

    /// Child nodes (empty for text).
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Text { .. } => &[],
            Self::Block(parent)
            | Self::Paragraph(parent)
            | Self::Span(parent)
            | Self::Strong(parent)
            | Self::Emphasis(parent)
            | Self::InlineCode(parent)
            | Self::Code(parent)
            | Self::List(parent)
            | Self::ListItem(parent) => &parent.children,
            Self::Heading { children, .. }
            | Self::Admonition { children, .. }
            | Self::Link { children, .. } => children,
        }
    }

    /// Concatenated text of this node and its descendants.
    #[must_use]
    pub fn flatten_text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        if let Self::Text { value } = self {
            out.push_str(value);
        }
        for child in self.children() {
            child.push_text(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kind_round_trips_through_node() {
        for kind in [
            Kind::Block,
            Kind::Paragraph,
            Kind::Span,
            Kind::Strong,
            Kind::Emphasis,
            Kind::InlineCode,
            Kind::Code,
            Kind::List,
            Kind::ListItem,
        ] {
            assert_eq!(kind.node(Vec::new()).kind(), Some(kind));
        }
        assert_eq!(Node::text("x").kind(), None);
        assert_eq!(Node::heading(1, Vec::new()).kind(), None);
    }

    #[test]
    fn test_flatten_text() {
        let node = Kind::Span.node(vec![
            Node::text("("),
            Kind::Emphasis.node(vec![Node::text("seed")]),
            Node::link("#seed", vec![Node::text(")")]),
        ]);
        assert_eq!(node.flatten_text(), "(seed)");
    }

    #[test]
    fn test_serialize_shape() {
        let node = Kind::InlineCode.node(vec![Node::text("n")]);
        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "type": "inlineCode",
                "children": [{"type": "text", "value": "n"}]
            })
        );
    }

    #[test]
    fn test_serialize_admonition_with_id() {
        let node = Node::admonition(AdmonitionKind::Warning, vec![Node::text("Hot.")])
            .with_id("careful");
        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "type": "admonition",
                "kind": "warning",
                "id": "careful",
                "children": [{"type": "text", "value": "Hot."}]
            })
        );
    }

    #[test]
    fn test_serialize_heading_and_link() {
        let heading = serde_json::to_value(Node::heading(2, Vec::new())).unwrap();
        let link = serde_json::to_value(Node::link("#pkg.roll", Vec::new())).unwrap();

        assert_eq!(
            heading,
            serde_json::json!({"type": "heading", "depth": 2, "children": []})
        );
        assert_eq!(
            link,
            serde_json::json!({"type": "link", "url": "#pkg.roll", "children": []})
        );
    }

    #[test]
    fn test_text_carries_no_id() {
        let mut node = Node::text("x");
        assert!(!node.set_id("a".to_owned()));
        assert_eq!(node.id(), None);

        let block = Kind::Block.node(Vec::new()).with_id("a");
        assert_eq!(block.id(), Some("a"));
    }

    #[test]
    fn test_admonition_names() {
        let names: Vec<_> = AdmonitionKind::ALL
            .iter()
            .copied()
            .map(AdmonitionKind::as_str)
            .collect();
        assert_eq!(
            names,
            vec![
                "attention",
                "caution",
                "danger",
                "error",
                "hint",
                "important",
                "note",
                "tip",
                "warning"
            ]
        );
    }
}
