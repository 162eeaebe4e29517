//! Placeholder nodes awaiting autodoc content.

use autodoc_tree::Node;
use serde::Serialize;

use crate::request::AutodocRequest;

/// Placeholder for the documentation of one module.
///
/// Created when the document is parsed, with no children. The build step
/// replaces the children once with the translated Sphinx output for the
/// module. Several pending nodes may request the same module.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PendingNode {
    #[serde(flatten)]
    request: AutodocRequest,
    #[serde(skip)]
    line: usize,
    children: Vec<Node>,
}

impl PendingNode {
    /// Create a pending node for a request found on `line` (1-indexed).
    #[must_use]
    pub fn new(request: AutodocRequest, line: usize) -> Self {
        Self {
            request,
            line,
            children: Vec::new(),
        }
    }

    /// The request this node stands for.
    #[must_use]
    pub fn request(&self) -> &AutodocRequest {
        &self.request
    }

    /// Module path of the request.
    #[must_use]
    pub fn module(&self) -> &str {
        self.request.module()
    }

    /// Source line of the directive.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Translated content (empty until the build step fills it).
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Replace the children wholesale.
    pub fn replace_children(&mut self, children: Vec<Node>) {
        self.children = children;
    }
}
