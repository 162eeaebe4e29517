//! Error types for Sphinx builds.

use std::path::PathBuf;

use autodoc_tree::{ParseError, TranslateError};

/// Error building the autodoc content of one document.
///
/// Any of these aborts the build of that document. Other documents are not
/// affected.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BuildError {
    /// Filesystem error while preparing or reading the working directory.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The Sphinx process could not be started.
    #[error("failed to start '{command}': {source}")]
    Spawn {
        /// Program that failed to start.
        command: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Sphinx exited unsuccessfully.
    #[error(
        "sphinx-build failed ({}), see {}",
        describe_exit(*exit_code),
        stderr_path.display()
    )]
    SphinxFailed {
        /// Exit code, `None` if the process was killed by a signal.
        exit_code: Option<i32>,
        /// Captured standard error of the process.
        stderr_path: PathBuf,
    },

    /// Sphinx succeeded but did not write the expected XML file.
    #[error("sphinx-build produced no output at {}", path.display())]
    MissingOutput {
        /// Expected output path.
        path: PathBuf,
    },

    /// The XML output could not be parsed.
    #[error("invalid sphinx-build output: {0}")]
    Parse(#[from] ParseError),

    /// The XML output contains an element outside the supported vocabulary.
    #[error("{0}")]
    Translate(#[from] TranslateError),
}

impl BuildError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn describe_exit(code: Option<i32>) -> String {
    code.map_or_else(
        || "terminated by signal".to_owned(),
        |code| format!("exit code {code}"),
    )
}
