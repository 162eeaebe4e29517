//! The `::automodule` directive.
//!
//! A document requests API documentation for a Python module with a leaf
//! directive on its own line:
//!
//! ```text
//! ::automodule[randomy]{members undoc-members private-members="_seed"}
//! ```
//!
//! The bracket content is the dotted module path. The attributes are the four
//! autodoc options (`members`, `undoc-members`, `private-members`,
//! `special-members`), given either as bare flags or with a value.
//!
//! [`interpret`] turns one parsed directive into a [`PendingNode`](crate::PendingNode).

mod args;
mod automodule;
pub(crate) mod fence;
mod parser;

pub use args::{DirectiveArgs, FLAG_PRESENT};
pub use automodule::{AUTOMODULE, interpret, unknown_options};
pub use parser::{ParsedDirective, parse_leaf_line};
