//! Sphinx XML description trees and their translation to document nodes.
//!
//! `sphinx-build -b xml` produces a docutils XML document in which every
//! documented Python object is a `desc` element. This crate covers the path
//! from that XML to the document engine's own node vocabulary:
//!
//! - [`parse_xml`]: parse the XML output into an [`XmlElement`] tree
//! - [`collect_descriptions`] and [`group_by_module`]: find `desc` elements and
//!   bucket them by the module named in their `ids` attribute
//! - [`translate`]: rewrite a description tree into [`Node`]s using a closed
//!   allow-list of element names
//! - [`render_html`]: render translated nodes as HTML
//!
//! # Example
//!
//! ```
//! use autodoc_tree::{collect_descriptions, group_by_module, parse_xml, translate_all};
//!
//! let xml = r#"<document>
//!   <desc ids="module-pkg.mod"><desc_signature><desc_name>run</desc_name></desc_signature></desc>
//! </document>"#;
//!
//! let root = parse_xml(xml).unwrap();
//! let groups = group_by_module(collect_descriptions(&root));
//! let nodes = translate_all(groups.get("pkg.mod").unwrap()).unwrap();
//! assert_eq!(nodes.len(), 1);
//! ```

mod error;
mod group;
mod html;
mod node;
mod parser;
mod translate;
mod xml;

pub use error::{ParseError, TranslateError};
pub use group::{ModuleGroups, collect_descriptions, group_by_module, module_key};
pub use html::{escape_html, render_html};
pub use node::{AdmonitionKind, Kind, Node, Parent};
pub use parser::parse_xml;
pub use translate::{Rule, interleave, rule_for, translate, translate_all};
pub use xml::{XmlElement, XmlNode};
