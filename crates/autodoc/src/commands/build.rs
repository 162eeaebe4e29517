//! `autodoc build` command implementation.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use autodoc_config::{CliSettings, Config, OutputConfig, OutputFormat};
use autodoc_document::{Document, ParsedDocument};
use autodoc_sphinx::{AutodocBuilder, ProcessRunner, SphinxConf, SphinxRunner};
use clap::Args;
use rayon::prelude::*;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Markdown files to build.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output directory (overrides config, default: build/).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format: html or json (overrides config).
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Sphinx build command (overrides config).
    #[arg(long, env = "SPHINX_BUILD")]
    sphinx_build: Option<String>,

    /// Keep Sphinx working directories for inspection.
    #[arg(long)]
    keep_workdir: bool,

    /// Path to configuration file (default: auto-discover autodoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

/// A document written to disk.
struct Built {
    target: PathBuf,
    warnings: Vec<String>,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            command: self.sphinx_build.clone(),
            output_dir: self.output_dir.clone(),
            format: self.format,
            keep_workdir: self.keep_workdir.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let sphinx = &config.sphinx_resolved;
        let runner = ProcessRunner::new(&sphinx.command).with_args(sphinx.args.iter().cloned());
        let builder = AutodocBuilder::new(runner)
            .with_conf(
                SphinxConf::new()
                    .with_extensions(sphinx.extensions.iter().cloned())
                    .with_python_path(sphinx.python_path.iter().cloned()),
            )
            .with_work_root(sphinx.work_dir.clone())
            .keep_workdir(sphinx.keep_workdir);

        let targets = plan_targets(&self.files, &config.output_resolved)?;
        let out_dir = &config.output_resolved.dir;
        fs::create_dir_all(out_dir).map_err(|e| CliError::file(out_dir, e))?;
        output.info(&format!("Output: {}", out_dir.display()));

        let format = config.output_resolved.format;
        let results: Vec<_> = self
            .files
            .par_iter()
            .zip(targets)
            .map(|(path, target)| build_file(&builder, path, target, format))
            .collect();

        let mut failed = 0;
        for (path, result) in self.files.iter().zip(results) {
            match result {
                Ok(built) => {
                    for warning in &built.warnings {
                        output.warning(&format!("{}: {warning}", path.display()));
                    }
                    output.success(&format!(
                        "{} -> {}",
                        path.display(),
                        built.target.display()
                    ));
                }
                Err(err) => {
                    failed += 1;
                    output.error(&format!("{}: {err}", path.display()));
                }
            }
        }

        if failed > 0 {
            return Err(CliError::Failed(format!(
                "{failed} of {} documents failed",
                self.files.len()
            )));
        }
        Ok(())
    }
}

/// Build one document and write it to `target`.
fn build_file<R: SphinxRunner>(
    builder: &AutodocBuilder<R>,
    path: &Path,
    target: PathBuf,
    format: OutputFormat,
) -> Result<Built, CliError> {
    let source = fs::read_to_string(path).map_err(|e| CliError::file(path, e))?;
    let ParsedDocument {
        mut document,
        mut warnings,
    } = Document::parse(&source);

    let report = builder.build(&mut document)?;
    warnings.extend(report.warnings());
    if let Some(workdir) = &report.workdir {
        tracing::info!(document = %path.display(), workdir = %workdir.display(), "Sphinx working directory kept");
    }

    let rendered = match format {
        OutputFormat::Html => document.to_html(),
        OutputFormat::Json => document.to_json()?,
    };
    fs::write(&target, rendered).map_err(|e| CliError::file(&target, e))?;

    Ok(Built { target, warnings })
}

/// Target path of every source, in order.
///
/// Fails before anything is built if two sources share a target, since the
/// parallel writes would overwrite each other.
fn plan_targets(files: &[PathBuf], output: &OutputConfig) -> Result<Vec<PathBuf>, CliError> {
    let mut owners: HashMap<PathBuf, &PathBuf> = HashMap::with_capacity(files.len());
    let mut targets = Vec::with_capacity(files.len());

    for source in files {
        let target = target_path(source, output);
        if let Some(first) = owners.insert(target.clone(), source) {
            return Err(CliError::TargetConflict {
                target,
                first: first.clone(),
                second: source.clone(),
            });
        }
        targets.push(target);
    }
    Ok(targets)
}

/// `<output dir>/<source stem>.<format extension>`.
fn target_path(source: &Path, output: &OutputConfig) -> PathBuf {
    let mut name = source
        .file_stem()
        .unwrap_or(source.as_os_str())
        .to_os_string();
    name.push(".");
    name.push(output.format.extension());
    output.dir.join(name)
}
