//! HTML and JSON output for built documents.
//!
//! Markdown blocks are joined into one source with an HTML comment standing in
//! for each autodoc block. The comments survive Markdown rendering untouched
//! and are swapped for the rendered module documentation in a single pass.
//! Each render picks a nonce for its comments that the document's own
//! Markdown does not contain, so comments written by the author are never
//! replaced.

use std::fmt::Write;
use std::sync::LazyLock;

use autodoc_tree::{escape_html, render_html};
use pulldown_cmark::{Options, Parser, html};
use regex::{Captures, Regex};

use crate::document::{Block, Document};
use crate::pending::PendingNode;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!--autodoc-([0-9a-f]+):(\d+)-->").expect("invalid placeholder regex")
});

impl Document {
    /// Render the document to HTML.
    ///
    /// Each autodoc block becomes
    /// `<div class="autodoc" data-module="...">...</div>`, empty if the build
    /// produced nothing for the module.
    ///
    /// # Example
    ///
    /// ```
    /// use autodoc_document::Document;
    ///
    /// let parsed = Document::parse("# API\n::automodule[pkg]\n");
    /// assert_eq!(
    ///     parsed.document.to_html(),
    ///     "<h1>API</h1>\n<div class=\"autodoc\" data-module=\"pkg\"></div>\n"
    /// );
    /// ```
    #[must_use]
    pub fn to_html(&self) -> String {
        let nonce = self.placeholder_nonce();
        let mut markdown = String::new();
        let mut sections = Vec::new();

        for block in self.blocks() {
            match block {
                Block::Markdown { value } => markdown.push_str(value),
                Block::Autodoc(node) => {
                    if !markdown.is_empty() && !markdown.ends_with('\n') {
                        markdown.push('\n');
                    }
                    let _ = write!(markdown, "\n<!--autodoc-{nonce}:{}-->\n\n", sections.len());
                    sections.push(render_section(node));
                }
            }
        }

        let mut out = String::with_capacity(markdown.len());
        html::push_html(&mut out, Parser::new_ext(&markdown, markdown_options()));

        if sections.is_empty() {
            return out;
        }
        PLACEHOLDER
            .replace_all(&out, |caps: &Captures<'_>| {
                if caps[1] != nonce {
                    return caps[0].to_owned();
                }
                caps[2]
                    .parse::<usize>()
                    .ok()
                    .and_then(|idx| sections.get(idx))
                    .map_or_else(|| caps[0].to_owned(), Clone::clone)
            })
            .into_owned()
    }

    /// Smallest hex nonce whose placeholder prefix appears in no Markdown block.
    fn placeholder_nonce(&self) -> String {
        (0_u64..)
            .map(|n| format!("{n:x}"))
            .find(|nonce| {
                let prefix = format!("<!--autodoc-{nonce}:");
                !self.blocks().iter().any(
                    |block| matches!(block, Block::Markdown { value } if value.contains(&prefix)),
                )
            })
            .unwrap_or_default()
    }

    /// Serialize the document tree as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn markdown_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

fn render_section(node: &PendingNode) -> String {
    format!(
        r#"<div class="autodoc" data-module="{}">{}</div>"#,
        escape_html(node.module()),
        render_html(node.children())
    )
}
