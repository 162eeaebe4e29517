//! CLI error types.

use std::path::PathBuf;

use autodoc_config::ConfigError;
use autodoc_sphinx::BuildError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "{} and {} would both be written to {}",
        first.display(),
        second.display(),
        target.display()
    )]
    TargetConflict {
        target: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Failed(String),
}

impl CliError {
    pub(crate) fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }
}
