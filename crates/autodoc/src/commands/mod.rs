//! CLI command implementations.

mod build;
mod request;

pub(crate) use build::BuildArgs;
pub(crate) use request::RequestArgs;
