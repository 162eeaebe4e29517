//! Translation of Sphinx description trees into document nodes.
//!
//! Every element name the translator accepts is listed in [`RULES`] together
//! with the rule that converts it. Names outside the table are rejected with
//! [`TranslateError::UnknownNode`] so that changes in Sphinx's output format
//! surface as build failures instead of silently malformed pages.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::TranslateError;
use crate::node::{AdmonitionKind, Kind, Node};
use crate::xml::{XmlElement, XmlNode};

/// Conversion applied to one element name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    /// Rename the element and translate its children.
    Rename(Kind),
    /// Replace the element by the translation of its first child.
    ///
    /// Used for lexical tokens (spaces, punctuation, operators) that must not
    /// add a wrapper level.
    Collapse,
    /// Render parameters as `(p1, p2, ...)` inside a span.
    ParameterList,
    /// Render a field name as a span holding one emphasis.
    FieldName,
    /// Drop the element and its children.
    ///
    /// A `target` with a `refid` still passes that id on to the next
    /// translated sibling.
    Skip,
    /// Block whose titles are one heading level deeper.
    Section,
    /// Heading at the depth of the enclosing sections.
    Title,
    /// Informal heading (`Notes`, `Examples`), rendered as a bold paragraph.
    Rubric,
    /// Admonition box of the given kind.
    Admonition(AdmonitionKind),
    /// Link when the element has a `refid` or `refuri`, span otherwise.
    Reference,
}

/// Separator placed between translated parameters.
const PARAMETER_SEPARATOR: &str = ", ";

/// Deepest heading level a title can map to.
const MAX_HEADING_DEPTH: u8 = 6;

/// Allow-list of element names and their rules.
const RULES: &[(&str, Rule)] = &[
    // Description structure
    ("desc", Rule::Rename(Kind::Block)),
    ("desc_signature", Rule::Rename(Kind::Paragraph)),
    ("desc_signature_line", Rule::Rename(Kind::Span)),
    ("desc_content", Rule::Rename(Kind::Block)),
    ("desc_name", Rule::Rename(Kind::Strong)),
    ("desc_addname", Rule::Rename(Kind::Span)),
    ("desc_annotation", Rule::Rename(Kind::Emphasis)),
    ("desc_returns", Rule::Rename(Kind::Span)),
    ("desc_type", Rule::Rename(Kind::Span)),
    ("desc_optional", Rule::Rename(Kind::Span)),
    ("desc_parameterlist", Rule::ParameterList),
    ("desc_parameter", Rule::Rename(Kind::Span)),
    // Signature tokens
    ("desc_sig_name", Rule::Rename(Kind::Emphasis)),
    ("desc_sig_space", Rule::Collapse),
    ("desc_sig_punctuation", Rule::Collapse),
    ("desc_sig_operator", Rule::Collapse),
    ("desc_sig_keyword", Rule::Rename(Kind::Span)),
    ("desc_sig_keyword_type", Rule::Rename(Kind::Span)),
    ("desc_sig_literal_number", Rule::Rename(Kind::Span)),
    ("desc_sig_literal_string", Rule::Rename(Kind::Span)),
    ("desc_sig_literal_char", Rule::Rename(Kind::Span)),
    // Invisible markup
    ("index", Rule::Skip),
    ("target", Rule::Skip),
    ("comment", Rule::Skip),
    ("substitution_definition", Rule::Skip),
    // Field lists (`:param x:`, `:rtype:`)
    ("field_list", Rule::Rename(Kind::List)),
    ("field", Rule::Rename(Kind::ListItem)),
    ("field_name", Rule::FieldName),
    ("field_body", Rule::Rename(Kind::Block)),
    // Sections
    ("section", Rule::Section),
    ("title", Rule::Title),
    ("rubric", Rule::Rubric),
    // Admonitions
    ("attention", Rule::Admonition(AdmonitionKind::Attention)),
    ("caution", Rule::Admonition(AdmonitionKind::Caution)),
    ("danger", Rule::Admonition(AdmonitionKind::Danger)),
    ("error", Rule::Admonition(AdmonitionKind::Error)),
    ("hint", Rule::Admonition(AdmonitionKind::Hint)),
    ("important", Rule::Admonition(AdmonitionKind::Important)),
    ("note", Rule::Admonition(AdmonitionKind::Note)),
    ("tip", Rule::Admonition(AdmonitionKind::Tip)),
    ("warning", Rule::Admonition(AdmonitionKind::Warning)),
    // Body content
    ("paragraph", Rule::Rename(Kind::Paragraph)),
    ("block_quote", Rule::Rename(Kind::Block)),
    ("literal_block", Rule::Rename(Kind::Code)),
    ("doctest_block", Rule::Rename(Kind::Code)),
    ("bullet_list", Rule::Rename(Kind::List)),
    ("enumerated_list", Rule::Rename(Kind::List)),
    ("list_item", Rule::Rename(Kind::ListItem)),
    ("definition_list", Rule::Rename(Kind::List)),
    ("definition_list_item", Rule::Rename(Kind::ListItem)),
    ("term", Rule::Rename(Kind::Strong)),
    ("classifier", Rule::Rename(Kind::Emphasis)),
    ("definition", Rule::Rename(Kind::Block)),
    ("line_block", Rule::Rename(Kind::Block)),
    ("line", Rule::Rename(Kind::Paragraph)),
    // Inline markup
    ("emphasis", Rule::Rename(Kind::Emphasis)),
    ("strong", Rule::Rename(Kind::Strong)),
    ("literal", Rule::Rename(Kind::InlineCode)),
    ("literal_emphasis", Rule::Rename(Kind::Emphasis)),
    ("literal_strong", Rule::Rename(Kind::Strong)),
    ("inline", Rule::Rename(Kind::Span)),
    ("reference", Rule::Reference),
    ("pending_xref", Rule::Rename(Kind::Span)),
    ("title_reference", Rule::Rename(Kind::Span)),
];

static RULE_TABLE: LazyLock<HashMap<&'static str, Rule>> =
    LazyLock::new(|| RULES.iter().copied().collect());

/// Look up the rule for an element name.
#[must_use]
pub fn rule_for(name: &str) -> Option<Rule> {
    RULE_TABLE.get(name).copied()
}

/// Interleave `spacer` between consecutive items.
///
/// `N` items produce `2N - 1` values; an empty input stays empty.
///
/// # Example
///
/// ```
/// use autodoc_tree::interleave;
///
/// assert_eq!(interleave(vec!["a", "b", "c"], &","), vec!["a", ",", "b", ",", "c"]);
/// assert_eq!(interleave(vec!["a"], &","), vec!["a"]);
/// assert!(interleave(Vec::<&str>::new(), &",").is_empty());
/// ```
#[must_use]
pub fn interleave<T: Clone>(items: Vec<T>, spacer: &T) -> Vec<T> {
    let mut out = Vec::with_capacity(items.len().saturating_mul(2).saturating_sub(1));
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push(spacer.clone());
        }
        out.push(item);
    }
    out
}

/// Translate one node of a description tree.
///
/// Text leaves are returned unchanged. Elements are converted according to
/// their [`Rule`]; invisible elements ([`Rule::Skip`]) yield `None`.
///
/// # Errors
///
/// Returns [`TranslateError::UnknownNode`] for the first element (in document
/// order) whose name is not in the allow-list.
pub fn translate(node: &XmlNode) -> Result<Option<Node>, TranslateError> {
    translate_node(node, Scope::default())
}

/// Translate a sequence of description elements (one module bucket).
///
/// # Errors
///
/// Returns the first translation error encountered.
pub fn translate_all(elements: &[&XmlElement]) -> Result<Vec<Node>, TranslateError> {
    let mut nodes = Vec::with_capacity(elements.len());
    for element in elements {
        nodes.extend(translate_element(element, Scope::default())?);
    }
    Ok(nodes)
}

/// Position of a node relative to enclosing sections.
#[derive(Clone, Copy, Debug, Default)]
struct Scope {
    sections: u8,
}

impl Scope {
    fn nested(self) -> Self {
        Self {
            sections: self.sections.saturating_add(1),
        }
    }

    fn heading_depth(self) -> u8 {
        self.sections.clamp(1, MAX_HEADING_DEPTH)
    }
}

fn translate_node(node: &XmlNode, scope: Scope) -> Result<Option<Node>, TranslateError> {
    match node {
        XmlNode::Text(text) => Ok(Some(Node::text(text.as_str()))),
        XmlNode::Element(element) => translate_element(element, scope),
    }
}

fn translate_element(element: &XmlElement, scope: Scope) -> Result<Option<Node>, TranslateError> {
    let rule = rule_for(&element.name).ok_or_else(|| TranslateError::UnknownNode {
        name: element.name.clone(),
    })?;

    let node = match rule {
        Rule::Skip => return Ok(None),
        Rule::Collapse => {
            return match element.children.first() {
                Some(first) => translate_node(first, scope),
                None => Ok(Some(Node::text(""))),
            };
        }
        Rule::Rename(kind) => kind.node(translate_children(&element.children, scope)?),
        Rule::ParameterList => {
            let params = translate_children(&element.children, scope)?;
            let mut children = Vec::with_capacity(params.len() * 2 + 1);
            children.push(Node::text("("));
            children.extend(interleave(params, &Node::text(PARAMETER_SEPARATOR)));
            children.push(Node::text(")"));
            Kind::Span.node(children)
        }
        Rule::FieldName => {
            let emphasis = Kind::Emphasis.node(translate_children(&element.children, scope)?);
            Kind::Span.node(vec![emphasis])
        }
        Rule::Section => Kind::Block.node(translate_children(&element.children, scope.nested())?),
        Rule::Title => Node::heading(
            scope.heading_depth(),
            translate_children(&element.children, scope)?,
        ),
        Rule::Rubric => {
            let strong = Kind::Strong.node(translate_children(&element.children, scope)?);
            Kind::Paragraph.node(vec![strong])
        }
        Rule::Admonition(kind) => {
            Node::admonition(kind, translate_children(&element.children, scope)?)
        }
        Rule::Reference => {
            let children = translate_children(&element.children, scope)?;
            match link_url(element) {
                Some(url) => Node::link(url, children),
                None => Kind::Span.node(children),
            }
        }
    };
    Ok(Some(node))
}

/// Translate children in order, dropping invisible ones.
///
/// The `refid` of a `target` becomes the id of the next translated element.
fn translate_children(children: &[XmlNode], scope: Scope) -> Result<Vec<Node>, TranslateError> {
    let mut nodes = Vec::with_capacity(children.len());
    let mut anchor: Option<String> = None;

    for child in children {
        if let Some(id) = target_refid(child) {
            anchor = Some(id.to_owned());
        }
        let Some(mut node) = translate_node(child, scope)? else {
            continue;
        };
        if let Some(id) = anchor.take_if(|_| !matches!(node, Node::Text { .. })) {
            node.set_id(id);
        }
        nodes.push(node);
    }
    Ok(nodes)
}

fn target_refid(node: &XmlNode) -> Option<&str> {
    node.as_element()
        .filter(|element| element.name == "target")
        .and_then(|element| element.attr("refid"))
}

fn link_url(element: &XmlElement) -> Option<String> {
    if let Some(refid) = element.attr("refid") {
        return Some(format!("#{refid}"));
    }
    element.attr("refuri").map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_xml;
    use pretty_assertions::assert_eq;

    fn text(value: &str) -> Node {
        Node::text(value)
    }

    fn el(name: &str) -> XmlElement {
        XmlElement::new(name)
    }

    fn parameter(name: &str) -> XmlElement {
        el("desc_parameter").with_child(el("desc_sig_name").with_text(name))
    }

    fn visible(element: XmlElement) -> Node {
        translate(&element.into())
            .unwrap()
            .expect("element should be visible")
    }

    #[test]
    fn test_interleave() {
        assert_eq!(interleave(vec![1, 2, 3], &0), vec![1, 0, 2, 0, 3]);
        assert_eq!(interleave(vec![1], &0), vec![1]);
        assert_eq!(interleave(Vec::<i32>::new(), &0), Vec::<i32>::new());
    }

    #[test]
    fn test_interleave_length() {
        for n in 1..6 {
            let items: Vec<usize> = (0..n).collect();
            assert_eq!(interleave(items, &99).len(), 2 * n - 1);
        }
    }

    #[test]
    fn test_text_passes_through() {
        let node = translate(&XmlNode::text("plain")).unwrap();
        assert_eq!(node, Some(text("plain")));
    }

    #[test]
    fn test_parameter_list() {
        let list = el("desc_parameterlist")
            .with_child(parameter("p1"))
            .with_child(parameter("p2"));

        let node = visible(list);

        assert_eq!(node.kind(), Some(Kind::Span));
        assert_eq!(node.flatten_text(), "(p1, p2)");
        assert_eq!(
            node,
            Kind::Span.node(vec![
                text("("),
                Kind::Span.node(vec![Kind::Emphasis.node(vec![text("p1")])]),
                text(", "),
                Kind::Span.node(vec![Kind::Emphasis.node(vec![text("p2")])]),
                text(")"),
            ])
        );
    }

    #[test]
    fn test_empty_parameter_list() {
        let node = visible(el("desc_parameterlist"));
        assert_eq!(node, Kind::Span.node(vec![text("("), text(")")]));
    }

    #[test]
    fn test_name_is_strong() {
        let name = el("desc_name").with_child(el("desc_sig_name").with_text("random_numbers"));

        assert_eq!(
            visible(name),
            Kind::Strong.node(vec![Kind::Emphasis.node(vec![text("random_numbers")])])
        );
    }

    #[test]
    fn test_sig_name_is_emphasis() {
        let node = visible(el("desc_sig_name").with_text("seed"));
        assert_eq!(node, Kind::Emphasis.node(vec![text("seed")]));
    }

    #[test]
    fn test_tokens_collapse_without_wrapper() {
        for name in ["desc_sig_space", "desc_sig_punctuation", "desc_sig_operator"] {
            let node = visible(el(name).with_text("="));
            assert_eq!(node, text("="), "{name} should collapse to its first child");
        }
    }

    #[test]
    fn test_collapse_uses_first_child_only() {
        let token = el("desc_sig_punctuation")
            .with_child(el("inline").with_text(":"))
            .with_text("ignored");

        assert_eq!(visible(token), Kind::Span.node(vec![text(":")]));
    }

    #[test]
    fn test_collapse_empty_token() {
        assert_eq!(visible(el("desc_sig_space")), text(""));
    }

    #[test]
    fn test_field_name_is_emphasized() {
        let node = visible(el("field_name").with_text("Parameters"));

        assert_eq!(
            node,
            Kind::Span.node(vec![Kind::Emphasis.node(vec![text("Parameters")])])
        );
    }

    #[test]
    fn test_unknown_node_fails() {
        let err = translate(&el("desc_mystery").into()).unwrap_err();

        assert_eq!(
            err,
            TranslateError::UnknownNode {
                name: "desc_mystery".to_owned()
            }
        );
        assert!(err.to_string().contains("desc_mystery"));
    }

    #[test]
    fn test_unknown_nested_node_fails() {
        let desc = el("desc").with_child(el("desc_content").with_child(el("table")));
        let err = translate(&desc.into()).unwrap_err();

        assert_eq!(
            err,
            TranslateError::UnknownNode {
                name: "table".to_owned()
            }
        );
    }

    #[test]
    fn test_invisible_nodes_are_dropped() {
        for name in ["index", "target", "comment", "substitution_definition"] {
            assert_eq!(translate(&el(name).with_text("x").into()).unwrap(), None);
        }

        let content = el("desc_content")
            .with_child(el("index").with_attr("entries", "('single', 'f', 'f', '', None)"))
            .with_child(el("paragraph").with_text("Docs."));
        assert_eq!(
            visible(content),
            Kind::Block.node(vec![Kind::Paragraph.node(vec![text("Docs.")])])
        );
    }

    #[test]
    fn test_class_with_method() {
        let xml = r#"<desc domain="py" objtype="class" ids="module-pkg">
<desc_signature ids="pkg.Die"><desc_annotation>class </desc_annotation><desc_addname>pkg.</desc_addname><desc_name>Die</desc_name></desc_signature>
<desc_content>
<paragraph>A die.</paragraph>
<index entries="('single', 'roll() (pkg.Die method)', 'pkg.Die.roll', '', None)"/>
<desc domain="py" objtype="method"><desc_signature ids="pkg.Die.roll"><desc_name>roll</desc_name><desc_parameterlist/></desc_signature><desc_content><paragraph>Roll it.</paragraph></desc_content></desc>
</desc_content>
</desc>"#;
        let class = parse_xml(xml).unwrap();

        let nodes = translate_all(&[&class]).unwrap();

        let method = Kind::Block.node(vec![
            Kind::Paragraph.node(vec![
                Kind::Strong.node(vec![text("roll")]),
                Kind::Span.node(vec![text("("), text(")")]),
            ]),
            Kind::Block.node(vec![Kind::Paragraph.node(vec![text("Roll it.")])]),
        ]);
        assert_eq!(
            nodes,
            vec![Kind::Block.node(vec![
                Kind::Paragraph.node(vec![
                    Kind::Emphasis.node(vec![text("class ")]),
                    Kind::Span.node(vec![text("pkg.")]),
                    Kind::Strong.node(vec![text("Die")]),
                ]),
                Kind::Block.node(vec![
                    Kind::Paragraph.node(vec![text("A die.")]),
                    method,
                ]),
            ])]
        );
    }

    #[test]
    fn test_admonition() {
        let content = el("desc_content")
            .with_child(el("note").with_child(el("paragraph").with_text("Careful.")));

        assert_eq!(
            visible(content),
            Kind::Block.node(vec![Node::admonition(
                AdmonitionKind::Note,
                vec![Kind::Paragraph.node(vec![text("Careful.")])]
            )])
        );
    }

    #[test]
    fn test_every_admonition_kind() {
        for kind in AdmonitionKind::ALL {
            let node = visible(el(kind.as_str()).with_text("x"));
            assert_eq!(node, Node::admonition(kind, vec![text("x")]));
        }
    }

    #[test]
    fn test_internal_reference_is_link() {
        let reference = el("reference")
            .with_attr("internal", "True")
            .with_attr("refid", "pkg.Die.roll")
            .with_child(el("literal").with_text("roll"));

        assert_eq!(
            visible(reference),
            Node::link(
                "#pkg.Die.roll",
                vec![Kind::InlineCode.node(vec![text("roll")])]
            )
        );
    }

    #[test]
    fn test_external_reference_is_link() {
        let reference = el("reference")
            .with_attr("refuri", "https://docs.python.org/")
            .with_text("Python");

        assert_eq!(
            visible(reference),
            Node::link("https://docs.python.org/", vec![text("Python")])
        );
    }

    #[test]
    fn test_reference_without_target_is_span() {
        let node = visible(el("reference").with_text("x"));
        assert_eq!(node, Kind::Span.node(vec![text("x")]));
    }

    #[test]
    fn test_target_id_moves_to_next_sibling() {
        let content = el("desc_content")
            .with_child(el("target").with_attr("refid", "dice-notes"))
            .with_child(el("paragraph").with_text("Notes."))
            .with_child(el("paragraph").with_text("More."));

        assert_eq!(
            visible(content),
            Kind::Block.node(vec![
                Kind::Paragraph.node(vec![text("Notes.")]).with_id("dice-notes"),
                Kind::Paragraph.node(vec![text("More.")]),
            ])
        );
    }

    #[test]
    fn test_target_id_skips_text() {
        let paragraph = el("paragraph")
            .with_child(el("target").with_attr("refid", "seed"))
            .with_text("the ")
            .with_child(el("emphasis").with_text("seed"));

        assert_eq!(
            visible(paragraph),
            Kind::Paragraph.node(vec![
                text("the "),
                Kind::Emphasis.node(vec![text("seed")]).with_id("seed"),
            ])
        );
    }

    #[test]
    fn test_heading_depth_follows_sections() {
        let inner = el("section")
            .with_child(el("title").with_text("Details"))
            .with_child(el("paragraph").with_text("Deep."));
        let outer = el("section")
            .with_child(el("title").with_text("Usage"))
            .with_child(inner);

        assert_eq!(
            visible(outer),
            Kind::Block.node(vec![
                Node::heading(1, vec![text("Usage")]),
                Kind::Block.node(vec![
                    Node::heading(2, vec![text("Details")]),
                    Kind::Paragraph.node(vec![text("Deep.")]),
                ]),
            ])
        );
    }

    #[test]
    fn test_title_outside_section() {
        assert_eq!(
            visible(el("title").with_text("T")),
            Node::heading(1, vec![text("T")])
        );
    }

    #[test]
    fn test_rubric_is_bold_paragraph() {
        assert_eq!(
            visible(el("rubric").with_text("Examples")),
            Kind::Paragraph.node(vec![Kind::Strong.node(vec![text("Examples")])])
        );
    }

    #[test]
    fn test_docstring_blocks() {
        let code = visible(el("literal_block").with_text("roll(6)\nroll(20)"));
        assert_eq!(code, Kind::Code.node(vec![text("roll(6)\nroll(20)")]));

        let doctest = visible(el("doctest_block").with_text(">>> roll(6)\n4"));
        assert_eq!(doctest.kind(), Some(Kind::Code));

        let definitions = el("definition_list").with_child(
            el("definition_list_item")
                .with_child(el("term").with_text("sides"))
                .with_child(el("definition").with_child(el("paragraph").with_text("Faces."))),
        );
        assert_eq!(
            visible(definitions),
            Kind::List.node(vec![Kind::ListItem.node(vec![
                Kind::Strong.node(vec![text("sides")]),
                Kind::Block.node(vec![Kind::Paragraph.node(vec![text("Faces.")])]),
            ])])
        );

        let lines = el("line_block")
            .with_child(el("line").with_text("one"))
            .with_child(el("line").with_text("two"));
        assert_eq!(
            visible(lines),
            Kind::Block.node(vec![
                Kind::Paragraph.node(vec![text("one")]),
                Kind::Paragraph.node(vec![text("two")]),
            ])
        );
    }

    #[test]
    fn test_every_allow_listed_name_translates() {
        for (name, _) in RULES {
            let node = el(name).with_text("x");
            assert!(translate(&node.into()).is_ok(), "{name} should translate");
        }
    }

    #[test]
    fn test_rule_table_has_no_duplicates() {
        assert_eq!(RULE_TABLE.len(), RULES.len());
    }

    #[test]
    fn test_translation_is_deterministic() {
        let desc = el("desc")
            .with_child(
                el("desc_signature")
                    .with_child(el("desc_name").with_text("f"))
                    .with_child(el("desc_parameterlist").with_child(parameter("a"))),
            )
            .with_child(el("desc_content").with_child(el("paragraph").with_text("Docs.")));
        let node: XmlNode = desc.into();

        assert_eq!(translate(&node).unwrap(), translate(&node).unwrap());
    }

    #[test]
    fn test_translate_all_preserves_order() {
        let a = el("desc").with_text("a");
        let b = el("desc").with_text("b");
        let nodes = translate_all(&[&a, &b]).unwrap();

        assert_eq!(
            nodes,
            vec![
                Kind::Block.node(vec![text("a")]),
                Kind::Block.node(vec![text("b")]),
            ]
        );
    }
}
