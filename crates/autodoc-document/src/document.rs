//! Markdown documents split around autodoc directives.

use serde::Serialize;

use crate::directive::fence::FenceTracker;
use crate::directive::{AUTOMODULE, interpret, parse_leaf_line, unknown_options};
use crate::pending::PendingNode;

/// Top-level block of a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    /// Markdown source passed through unchanged.
    Markdown {
        /// Markdown text, line endings preserved.
        value: String,
    },
    /// Placeholder for module documentation.
    Autodoc(PendingNode),
}

/// A document: Markdown interleaved with pending autodoc nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "root")]
pub struct Document {
    children: Vec<Block>,
}

/// Result of parsing a document.
#[derive(Debug)]
pub struct ParsedDocument {
    /// The parsed document.
    pub document: Document,
    /// Warnings about directives that were ignored or partly ignored.
    pub warnings: Vec<String>,
}

impl Document {
    /// Parse Markdown source, turning every `::automodule` line into a
    /// [`PendingNode`].
    ///
    /// Directives inside fenced code blocks are left alone. A directive that
    /// fails validation stays in the Markdown as written and produces a
    /// warning. Other leaf directives are not interpreted.
    ///
    /// # Example
    ///
    /// ```
    /// use autodoc_document::Document;
    ///
    /// let parsed = Document::parse("# API\n\n::automodule[randomy]{members}\n");
    /// assert!(parsed.warnings.is_empty());
    /// assert_eq!(parsed.document.pending_nodes().count(), 1);
    /// ```
    #[must_use]
    pub fn parse(source: &str) -> ParsedDocument {
        let mut children = Vec::new();
        let mut warnings = Vec::new();
        let mut fence = FenceTracker::default();
        let mut markdown = String::new();

        for (idx, raw_line) in source.split_inclusive('\n').enumerate() {
            let line_num = idx + 1;
            let line = raw_line.trim_end_matches(['\n', '\r']);

            if fence.update(line) || fence.in_fence() {
                markdown.push_str(raw_line);
                continue;
            }

            let Some(parsed) = parse_leaf_line(line).filter(|p| p.name == AUTOMODULE) else {
                markdown.push_str(raw_line);
                continue;
            };

            match interpret(&parsed.args, line_num) {
                Ok(node) => {
                    for key in unknown_options(&parsed.args) {
                        warnings.push(format!(
                            "line {line_num}: unknown automodule option '{key}' ignored"
                        ));
                    }
                    flush_markdown(&mut markdown, &mut children);
                    children.push(Block::Autodoc(node));
                }
                Err(err) => {
                    warnings.push(err.to_string());
                    markdown.push_str(raw_line);
                }
            }
        }
        flush_markdown(&mut markdown, &mut children);

        let document = Self { children };
        tracing::debug!(
            blocks = document.children.len(),
            pending = document.pending_nodes().count(),
            "Parsed document"
        );

        ParsedDocument { document, warnings }
    }

    /// Blocks in document order.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.children
    }

    /// Pending nodes in document order.
    pub fn pending_nodes(&self) -> impl Iterator<Item = &PendingNode> {
        self.children.iter().filter_map(|block| match block {
            Block::Autodoc(node) => Some(node),
            Block::Markdown { .. } => None,
        })
    }

    /// Mutable pending nodes in document order.
    pub fn pending_nodes_mut(&mut self) -> impl Iterator<Item = &mut PendingNode> {
        self.children.iter_mut().filter_map(|block| match block {
            Block::Autodoc(node) => Some(node),
            Block::Markdown { .. } => None,
        })
    }
}

fn flush_markdown(markdown: &mut String, children: &mut Vec<Block>) {
    if !markdown.is_empty() {
        children.push(Block::Markdown {
            value: std::mem::take(markdown),
        });
    }
}
