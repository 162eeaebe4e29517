//! The `index.rst` request file handed to Sphinx.

use autodoc_document::{AutodocRequest, Document};

/// Accumulates autodoc requests for one build invocation.
///
/// Identical requests (same module, same options) are written once. Requests
/// for the same module with different options are all kept; Sphinx documents
/// the module once per block and every block lands in the same bucket.
#[derive(Debug, Default)]
pub struct RequestFile {
    requests: Vec<AutodocRequest>,
}

impl RequestFile {
    /// Create an empty request file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the requests of every pending node in `document`.
    #[must_use]
    pub fn from_document(document: &Document) -> Self {
        let mut file = Self::new();
        for node in document.pending_nodes() {
            file.push(node.request());
        }
        file
    }

    /// Add a request. Returns `false` if an identical one is already present.
    pub fn push(&mut self, request: &AutodocRequest) -> bool {
        if self.requests.contains(request) {
            return false;
        }
        self.requests.push(request.clone());
        true
    }

    /// Number of distinct requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Render the file: one `automodule` block per request, separated by
    /// blank lines.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = self
            .requests
            .iter()
            .map(AutodocRequest::render_rst)
            .collect::<Vec<_>>()
            .join("\n\n");
        out.push('\n');
        out
    }
}
