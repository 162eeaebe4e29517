//! The process boundary: invoking `sphinx-build`.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::BuildError;

/// Directories of one Sphinx invocation.
#[derive(Clone, Copy, Debug)]
pub struct Invocation<'a> {
    /// Directory holding `index.rst` and `conf.py`.
    pub source_dir: &'a Path,
    /// Directory Sphinx writes `index.xml` into.
    pub output_dir: &'a Path,
    /// Directory for the captured stdout and stderr logs.
    pub log_dir: &'a Path,
}

/// Result of a finished Sphinx process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOutcome {
    /// Exit code, `None` if the process was killed by a signal.
    pub exit_code: Option<i32>,
    /// Captured standard output.
    pub stdout_path: PathBuf,
    /// Captured standard error.
    pub stderr_path: PathBuf,
}

impl RunOutcome {
    /// Whether the process exited with status zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs Sphinx's XML builder over a prepared source directory.
///
/// Implementations block until the build has finished.
pub trait SphinxRunner: Send + Sync {
    /// Run one build.
    ///
    /// A nonzero exit is reported through [`RunOutcome`], not as an error.
    /// Errors are reserved for failing to run at all.
    fn run(&self, invocation: &Invocation<'_>) -> Result<RunOutcome, BuildError>;
}

/// [`SphinxRunner`] that spawns an external `sphinx-build` process.
#[derive(Clone, Debug)]
pub struct ProcessRunner {
    program: String,
    args: Vec<String>,
    extra_args: Vec<String>,
}

impl ProcessRunner {
    /// Default build command.
    pub const DEFAULT_COMMAND: &'static str = "sphinx-build";

    /// Create a runner for `command`.
    ///
    /// The command is split on whitespace, so `python -m sphinx` works.
    #[must_use]
    pub fn new(command: &str) -> Self {
        let mut words = command.split_whitespace().map(str::to_owned);
        let program = words.next().unwrap_or_default();
        Self {
            program,
            args: words.collect(),
            extra_args: Vec::new(),
        }
    }

    /// Extra arguments placed after `-b xml`.
    #[must_use]
    pub fn with_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.extra_args.extend(args);
        self
    }

    /// Arguments passed to the program for `invocation`.
    fn arguments(&self, invocation: &Invocation<'_>) -> Vec<String> {
        let mut args = self.args.clone();
        args.push("-b".to_owned());
        args.push("xml".to_owned());
        args.extend(self.extra_args.iter().cloned());
        args.push(invocation.source_dir.to_string_lossy().into_owned());
        args.push(invocation.output_dir.to_string_lossy().into_owned());
        args
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COMMAND)
    }
}

impl SphinxRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation<'_>) -> Result<RunOutcome, BuildError> {
        let stdout_path = invocation.log_dir.join("stdout.log");
        let stderr_path = invocation.log_dir.join("stderr.log");
        let stdout = File::create(&stdout_path).map_err(|e| BuildError::io(&stdout_path, e))?;
        let stderr = File::create(&stderr_path).map_err(|e| BuildError::io(&stderr_path, e))?;

        let args = self.arguments(invocation);
        tracing::debug!(program = %self.program, args = ?args, "Spawning Sphinx");

        let status = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr))
            .status()
            .map_err(|source| BuildError::Spawn {
                command: self.program.clone(),
                source,
            })?;

        Ok(RunOutcome {
            exit_code: status.code(),
            stdout_path,
            stderr_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn invocation() -> Invocation<'static> {
        Invocation {
            source_dir: Path::new("/w/source"),
            output_dir: Path::new("/w/build"),
            log_dir: Path::new("/w"),
        }
    }

    #[test]
    fn test_default_arguments() {
        let runner = ProcessRunner::default();

        assert_eq!(runner.program, "sphinx-build");
        assert_eq!(
            runner.arguments(&invocation()),
            vec!["-b", "xml", "/w/source", "/w/build"]
        );
    }

    #[test]
    fn test_command_words_and_extra_args() {
        let runner = ProcessRunner::new("python -m sphinx").with_args(["-q".to_owned()]);

        assert_eq!(runner.program, "python");
        assert_eq!(
            runner.arguments(&invocation()),
            vec!["-m", "sphinx", "-b", "xml", "-q", "/w/source", "/w/build"]
        );
    }

    #[test]
    fn test_outcome_success() {
        let outcome = |exit_code| RunOutcome {
            exit_code,
            stdout_path: PathBuf::new(),
            stderr_path: PathBuf::new(),
        };
        assert!(outcome(Some(0)).success());
        assert!(!outcome(Some(1)).success());
        assert!(!outcome(None).success());
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ProcessRunner::new("autodoc-no-such-sphinx-build");
        let invocation = Invocation {
            source_dir: dir.path(),
            output_dir: dir.path(),
            log_dir: dir.path(),
        };

        let err = runner.run(&invocation).unwrap_err();
        assert!(matches!(err, BuildError::Spawn { .. }));
    }
}
