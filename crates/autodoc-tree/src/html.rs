//! HTML rendering of translated nodes.

use crate::node::Node;

/// Render translated nodes as HTML.
///
/// # Example
///
/// ```
/// use autodoc_tree::{Kind, Node, render_html};
///
/// let nodes = vec![Kind::Strong.node(vec![Node::text("a < b")])];
/// assert_eq!(render_html(&nodes), "<strong>a &lt; b</strong>");
/// ```
#[must_use]
pub fn render_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        push_node(node, &mut out);
    }
    out
}

fn push_node(node: &Node, out: &mut String) {
    let heading;
    let (tag, attr) = match node {
        Node::Text { value } => {
            out.push_str(&escape_html(value));
            return;
        }
        Node::Heading { depth, .. } => {
            heading = format!("h{depth}");
            (heading.as_str(), None)
        }
        Node::Admonition { kind, .. } => (
            "aside",
            Some(("class", format!("admonition {}", kind.as_str()))),
        ),
        Node::Link { url, .. } => ("a", Some(("href", escape_html(url)))),
        _ => match node.kind() {
            Some(kind) => (kind.html_tag(), None),
            None => return,
        },
    };

    out.push('<');
    out.push_str(tag);
    if let Some(id) = node.id() {
        push_attr(out, "id", &escape_html(id));
    }
    if let Some((name, value)) = attr {
        push_attr(out, name, &value);
    }
    out.push('>');
    for child in node.children() {
        push_node(child, out);
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Append ` name="value"`; `value` must already be escaped.
fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(value);
    out.push('"');
}

/// Escape special HTML characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
