//! Minimal `conf.py` for the request project.

use std::path::PathBuf;

/// Extension that provides the `automodule` directive.
pub const AUTODOC_EXTENSION: &str = "sphinx.ext.autodoc";

/// Settings written to `conf.py`.
#[derive(Clone, Debug, Default)]
pub struct SphinxConf {
    extensions: Vec<String>,
    python_path: Vec<PathBuf>,
}

impl SphinxConf {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Extensions to enable in addition to autodoc.
    #[must_use]
    pub fn with_extensions(mut self, extensions: impl IntoIterator<Item = String>) -> Self {
        self.extensions.extend(extensions);
        self
    }

    /// Directories to put on `sys.path` so the documented modules import.
    ///
    /// Earlier entries take precedence.
    #[must_use]
    pub fn with_python_path(mut self, paths: impl IntoIterator<Item = PathBuf>) -> Self {
        self.python_path.extend(paths);
        self
    }

    /// Render `conf.py`.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from("# Generated by autodoc.\nimport sys\n\n");

        for path in self.python_path.iter().rev() {
            out.push_str("sys.path.insert(0, ");
            out.push_str(&py_str(&path.to_string_lossy()));
            out.push_str(")\n");
        }
        if !self.python_path.is_empty() {
            out.push('\n');
        }

        out.push_str("extensions = [\n");
        let extra = self
            .extensions
            .iter()
            .map(String::as_str)
            .filter(|ext| *ext != AUTODOC_EXTENSION);
        for ext in std::iter::once(AUTODOC_EXTENSION).chain(extra) {
            out.push_str("    ");
            out.push_str(&py_str(ext));
            out.push_str(",\n");
        }
        out.push_str("]\n");
        out
    }
}

/// Single-quoted Python string literal.
fn py_str(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_conf() {
        assert_eq!(
            SphinxConf::new().render(),
            "# Generated by autodoc.\nimport sys\n\nextensions = [\n    'sphinx.ext.autodoc',\n]\n"
        );
    }

    #[test]
    fn test_python_path_and_extensions() {
        let conf = SphinxConf::new()
            .with_python_path([PathBuf::from("/src/a"), PathBuf::from("/src/b")])
            .with_extensions([
                "sphinx.ext.autodoc".to_owned(),
                "sphinx.ext.napoleon".to_owned(),
            ]);

        assert_eq!(
            conf.render(),
            "# Generated by autodoc.\nimport sys\n\n\
             sys.path.insert(0, '/src/b')\n\
             sys.path.insert(0, '/src/a')\n\n\
             extensions = [\n    'sphinx.ext.autodoc',\n    'sphinx.ext.napoleon',\n]\n"
        );
    }

    #[test]
    fn test_py_str_escapes() {
        assert_eq!(py_str(r"C:\it's"), r"'C:\\it\'s'");
    }
}
