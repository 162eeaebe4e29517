//! Per-build working directories.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::BuildError;

const SOURCE_DIR: &str = "source";
const OUTPUT_DIR: &str = "build";
const REQUEST_FILE: &str = "index.rst";
const CONF_FILE: &str = "conf.py";
const OUTPUT_FILE: &str = "index.xml";

/// Freshly created directory owned by a single build.
///
/// Layout:
///
/// ```text
/// autodoc-XXXXXX/
///   source/index.rst
///   source/conf.py
///   build/index.xml      (written by Sphinx)
///   stdout.log
///   stderr.log
/// ```
///
/// The directory is removed on drop unless [`keep`](Self::keep) is called.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create a new workspace under `root`, or under the system temp
    /// directory if `root` is `None`.
    pub fn create(root: Option<&Path>) -> Result<Self, BuildError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("autodoc-");
        let dir = match root {
            Some(root) => {
                fs::create_dir_all(root).map_err(|e| BuildError::io(root, e))?;
                builder.tempdir_in(root)
            }
            None => builder.tempdir(),
        }
        .map_err(|e| BuildError::io(root.map_or_else(std::env::temp_dir, Path::to_path_buf), e))?;

        let workspace = Self { dir };
        let source = workspace.source_dir();
        fs::create_dir(&source).map_err(|e| BuildError::io(&source, e))?;
        Ok(workspace)
    }

    /// Workspace root.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn source_dir(&self) -> PathBuf {
        self.path().join(SOURCE_DIR)
    }

    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.path().join(OUTPUT_DIR)
    }

    /// Where Sphinx writes the XML for the request file.
    #[must_use]
    pub fn output_file(&self) -> PathBuf {
        self.output_dir().join(OUTPUT_FILE)
    }

    /// Write the request file and `conf.py` into the source directory.
    pub fn write_sources(&self, request: &str, conf: &str) -> Result<(), BuildError> {
        let source = self.source_dir();
        for (name, contents) in [(REQUEST_FILE, request), (CONF_FILE, conf)] {
            let path = source.join(name);
            fs::write(&path, contents).map_err(|e| BuildError::io(&path, e))?;
        }
        Ok(())
    }

    /// Read the XML output.
    pub fn read_output(&self) -> Result<String, BuildError> {
        let path = self.output_file();
        if !path.is_file() {
            return Err(BuildError::MissingOutput { path });
        }
        fs::read_to_string(&path).map_err(|e| BuildError::io(&path, e))
    }

    /// Keep the directory on disk and return its path.
    #[must_use]
    pub fn keep(self) -> PathBuf {
        self.dir.keep()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_layout() {
        let root = tempfile::tempdir().unwrap();
        let workspace = Workspace::create(Some(root.path())).unwrap();

        assert!(workspace.path().starts_with(root.path()));
        assert!(workspace.source_dir().is_dir());
        assert!(!workspace.output_dir().exists());
        assert_eq!(
            workspace.output_file(),
            workspace.path().join("build/index.xml")
        );
    }

    #[test]
    fn test_write_sources() {
        let workspace = Workspace::create(None).unwrap();
        workspace.write_sources(".. automodule:: pkg\n", "extensions = []\n").unwrap();

        assert_eq!(
            fs::read_to_string(workspace.source_dir().join("index.rst")).unwrap(),
            ".. automodule:: pkg\n"
        );
        assert_eq!(
            fs::read_to_string(workspace.source_dir().join("conf.py")).unwrap(),
            "extensions = []\n"
        );
    }

    #[test]
    fn test_missing_output() {
        let workspace = Workspace::create(None).unwrap();
        let err = workspace.read_output().unwrap_err();

        assert!(matches!(err, BuildError::MissingOutput { path } if path.ends_with("build/index.xml")));
    }

    #[test]
    fn test_removed_on_drop_unless_kept() {
        let root = tempfile::tempdir().unwrap();

        let dropped = Workspace::create(Some(root.path())).unwrap();
        let dropped_path = dropped.path().to_path_buf();
        drop(dropped);
        assert!(!dropped_path.exists());

        let kept = Workspace::create(Some(root.path())).unwrap().keep();
        assert!(kept.join("source").is_dir());
    }

    #[test]
    fn test_two_workspaces_are_distinct() {
        let a = Workspace::create(None).unwrap();
        let b = Workspace::create(None).unwrap();
        assert!(a.path() != b.path());
    }
}
