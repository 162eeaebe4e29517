//! Markdown documents carrying `::automodule` requests.
//!
//! A document is parsed into Markdown blocks and [`PendingNode`]s, one per
//! `::automodule` directive. The build step (in `autodoc-sphinx`) fills each
//! pending node with translated Sphinx output, after which the document can
//! be rendered with [`Document::to_html`] or [`Document::to_json`].
//!
//! # Example
//!
//! ```
//! use autodoc_document::{AutodocOption, Document};
//!
//! let parsed = Document::parse("# Reference\n\n::automodule[randomy]{members}\n");
//! let node = parsed.document.pending_nodes().next().unwrap();
//!
//! assert_eq!(node.module(), "randomy");
//! assert_eq!(node.request().option(AutodocOption::Members), Some(""));
//! assert_eq!(
//!     node.request().render_rst(),
//!     ".. automodule:: randomy\n   :members:"
//! );
//! ```

pub mod directive;
mod document;
mod error;
mod pending;
mod render;
mod request;

pub use document::{Block, Document, ParsedDocument};
pub use error::DirectiveError;
pub use pending::PendingNode;
pub use request::{AutodocOption, AutodocRequest, coerce_option};
