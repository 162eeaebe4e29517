//! Configuration management for autodoc.
//!
//! Parses `autodoc.toml` with serde and discovers it in the current directory
//! or its parents. Every section is optional.
//!
//! ```toml
//! [sphinx]
//! command = "sphinx-build"
//! args = ["-q"]
//! extensions = ["sphinx.ext.napoleon"]
//! python_path = ["src"]
//! keep_workdir = false
//! work_dir = ".autodoc"
//!
//! [output]
//! dir = "build"
//! format = "html"
//! ```
//!
//! Relative paths are resolved against the directory holding the config file.
//! CLI settings are applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields: `sphinx.command`, `sphinx.python_path`, `sphinx.work_dir`,
//! `output.dir`.

mod expand;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "autodoc.toml";

const DEFAULT_COMMAND: &str = "sphinx-build";
const DEFAULT_OUTPUT_DIR: &str = "build";

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the Sphinx build command.
    pub command: Option<String>,
    /// Override the output directory.
    pub output_dir: Option<PathBuf>,
    /// Override the output format.
    pub format: Option<OutputFormat>,
    /// Override the keep-workdir flag.
    pub keep_workdir: Option<bool>,
}

/// Output format of built documents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// HTML page.
    #[default]
    Html,
    /// JSON document tree.
    Json,
}

impl OutputFormat {
    /// File extension for documents in this format.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}' (expected html or json)")),
        }
    }
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    sphinx: SphinxConfigRaw,
    output: OutputConfigRaw,

    /// Resolved Sphinx configuration (set after loading).
    #[serde(skip)]
    pub sphinx_resolved: SphinxConfig,
    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw `[sphinx]` section (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SphinxConfigRaw {
    command: Option<String>,
    args: Vec<String>,
    extensions: Vec<String>,
    python_path: Vec<String>,
    keep_workdir: Option<bool>,
    work_dir: Option<String>,
}

/// Resolved Sphinx configuration with absolute paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SphinxConfig {
    /// Build command, split on whitespace when run.
    pub command: String,
    /// Extra arguments placed after `-b xml`.
    pub args: Vec<String>,
    /// Extensions enabled in addition to autodoc.
    pub extensions: Vec<String>,
    /// Directories added to `sys.path`.
    pub python_path: Vec<PathBuf>,
    /// Keep working directories after successful builds.
    pub keep_workdir: bool,
    /// Root for working directories; the system temp dir if unset.
    pub work_dir: Option<PathBuf>,
}

impl Default for SphinxConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_COMMAND.to_owned(),
            args: Vec::new(),
            extensions: Vec::new(),
            python_path: Vec::new(),
            keep_workdir: false,
            work_dir: None,
        }
    }
}

/// Raw `[output]` section.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    dir: Option<String>,
    format: Option<OutputFormat>,
}

/// Resolved output configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Directory built documents are written to.
    pub dir: PathBuf,
    /// Format of built documents.
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            format: OutputFormat::default(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`sphinx.command`").
        field: String,
        /// Error message (e.g., "${`SPHINX_BUILD`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `autodoc.toml` in the current directory and its parents, falling
    /// back to defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `config_path` doesn't exist, or if reading,
    /// parsing, expansion or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(command) = &settings.command {
            self.sphinx_resolved.command.clone_from(command);
        }
        if let Some(dir) = &settings.output_dir {
            self.output_resolved.dir.clone_from(dir);
        }
        if let Some(format) = settings.format {
            self.output_resolved.format = format;
        }
        if let Some(keep) = settings.keep_workdir {
            self.sphinx_resolved.keep_workdir = keep;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        Self::discover_from(&cwd)
    }

    fn discover_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            sphinx: SphinxConfigRaw::default(),
            output: OutputConfigRaw::default(),
            sphinx_resolved: SphinxConfig::default(),
            output_resolved: OutputConfig {
                dir: base.join(DEFAULT_OUTPUT_DIR),
                format: OutputFormat::default(),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the Sphinx command or an extension
    /// name is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.sphinx_resolved.command, "sphinx.command")?;
        for extension in &self.sphinx_resolved.extensions {
            require_non_empty(extension, "sphinx.extensions entry")?;
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(command) = &self.sphinx.command {
            self.sphinx.command = Some(expand::expand_env(command, "sphinx.command")?);
        }
        if let Some(work_dir) = &self.sphinx.work_dir {
            self.sphinx.work_dir = Some(expand::expand_env(work_dir, "sphinx.work_dir")?);
        }
        self.sphinx.python_path = self
            .sphinx
            .python_path
            .iter()
            .map(|path| expand::expand_env(path, "sphinx.python_path"))
            .collect::<Result<_, _>>()?;
        if let Some(dir) = &self.output.dir {
            self.output.dir = Some(expand::expand_env(dir, "output.dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.sphinx_resolved = SphinxConfig {
            command: self
                .sphinx
                .command
                .clone()
                .unwrap_or_else(|| DEFAULT_COMMAND.to_owned()),
            args: self.sphinx.args.clone(),
            extensions: self.sphinx.extensions.clone(),
            python_path: self
                .sphinx
                .python_path
                .iter()
                .map(|p| config_dir.join(p))
                .collect(),
            keep_workdir: self.sphinx.keep_workdir.unwrap_or(false),
            work_dir: self.sphinx.work_dir.as_ref().map(|d| config_dir.join(d)),
        };

        self.output_resolved = OutputConfig {
            dir: config_dir.join(self.output.dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR)),
            format: self.output.format.unwrap_or_default(),
        };
    }
}
