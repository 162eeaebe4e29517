//! Error types for directive interpretation.

/// Error turning an `::automodule` directive into a pending node.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DirectiveError {
    /// The directive has no module argument.
    #[error("line {line}: automodule requires a module name, e.g. ::automodule[pkg.mod]")]
    MissingModule {
        /// Source line (1-indexed).
        line: usize,
    },

    /// The module argument is not a dotted Python identifier.
    #[error("line {line}: '{module}' is not a valid module name")]
    InvalidModule {
        /// Source line (1-indexed).
        line: usize,
        /// The rejected argument.
        module: String,
    },
}
