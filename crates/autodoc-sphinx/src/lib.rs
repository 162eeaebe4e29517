//! Sphinx build orchestration for autodoc requests.
//!
//! [`AutodocBuilder::build`] takes a parsed [`Document`](autodoc_document::Document),
//! writes its requests to `index.rst` in a fresh working directory, runs
//! `sphinx-build -b xml` through a [`SphinxRunner`], and fills every pending
//! node with the translated descriptions of its module.
//!
//! The process boundary is the [`SphinxRunner`] trait; [`ProcessRunner`] is
//! the real implementation.

mod builder;
mod conf;
mod error;
mod request_file;
mod runner;
mod workspace;

pub use builder::{AutodocBuilder, BuildReport};
pub use conf::{AUTODOC_EXTENSION, SphinxConf};
pub use error::BuildError;
pub use request_file::RequestFile;
pub use runner::{Invocation, ProcessRunner, RunOutcome, SphinxRunner};
pub use workspace::Workspace;
