//! Build orchestration for one document.

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

use autodoc_document::{Document, PendingNode};
use autodoc_tree::{Node, collect_descriptions, group_by_module, parse_xml, translate_all};

use crate::conf::SphinxConf;
use crate::error::BuildError;
use crate::request_file::RequestFile;
use crate::runner::{Invocation, ProcessRunner, SphinxRunner};
use crate::workspace::Workspace;

/// Summary of a successful build.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Distinct requests written to the request file.
    pub requests: usize,
    /// Pending nodes that received content.
    pub filled: usize,
    /// Requested modules with no descriptions in the output, sorted.
    pub missing_modules: Vec<String>,
    /// Descriptions in the output that carried no module identifier.
    pub dropped: usize,
    /// Working directory, if it was kept.
    pub workdir: Option<PathBuf>,
}

impl BuildReport {
    /// Human-readable warnings for the report.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.missing_modules
            .iter()
            .map(|module| format!("module '{module}' not found in Sphinx output"))
            .collect()
    }
}

/// Fills the pending nodes of a document with Sphinx autodoc output.
///
/// Each [`build`](Self::build) call is independent: it creates its own
/// working directory, so one builder can serve several threads.
#[derive(Debug)]
pub struct AutodocBuilder<R = ProcessRunner> {
    runner: R,
    conf: SphinxConf,
    work_root: Option<PathBuf>,
    keep_workdir: bool,
}

impl<R: SphinxRunner> AutodocBuilder<R> {
    /// Create a builder around `runner` with the default `conf.py`.
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            conf: SphinxConf::default(),
            work_root: None,
            keep_workdir: false,
        }
    }

    #[must_use]
    pub fn with_conf(mut self, conf: SphinxConf) -> Self {
        self.conf = conf;
        self
    }

    /// Directory under which working directories are created.
    #[must_use]
    pub fn with_work_root(mut self, root: Option<PathBuf>) -> Self {
        self.work_root = root;
        self
    }

    /// Keep working directories after successful builds.
    #[must_use]
    pub fn keep_workdir(mut self, keep: bool) -> Self {
        self.keep_workdir = keep;
        self
    }

    /// Run Sphinx for every pending node of `document` and fill them in.
    ///
    /// Steps:
    /// 1. Render the request file (identical requests once).
    /// 2. Write it with `conf.py` into a fresh working directory.
    /// 3. Run Sphinx and wait for it.
    /// 4. Parse `index.xml`, group descriptions by module, translate each
    ///    requested module once.
    /// 5. Give every pending node a copy of its module's translation.
    ///
    /// A document without pending nodes is returned untouched and Sphinx is
    /// not run. Pending nodes whose module is missing from the output keep no
    /// children and are listed in [`BuildReport::missing_modules`].
    ///
    /// On a nonzero exit the working directory is kept so the logs can be
    /// inspected.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if the working directory cannot be prepared,
    /// Sphinx cannot be run or fails, the output is missing or malformed, or
    /// the output contains an unsupported element.
    pub fn build(&self, document: &mut Document) -> Result<BuildReport, BuildError> {
        let requests = RequestFile::from_document(document);
        if requests.is_empty() {
            tracing::debug!("No automodule directives, skipping Sphinx");
            return Ok(BuildReport::default());
        }

        let workspace = Workspace::create(self.work_root.as_deref())?;
        workspace.write_sources(&requests.render(), &self.conf.render())?;

        let source_dir = workspace.source_dir();
        let output_dir = workspace.output_dir();
        let invocation = Invocation {
            source_dir: &source_dir,
            output_dir: &output_dir,
            log_dir: workspace.path(),
        };

        tracing::info!(
            requests = requests.len(),
            workdir = %workspace.path().display(),
            "Running Sphinx"
        );
        let outcome = self.runner.run(&invocation)?;
        if !outcome.success() {
            let workdir = workspace.keep();
            tracing::warn!(
                exit_code = ?outcome.exit_code,
                workdir = %workdir.display(),
                "Sphinx failed, keeping working directory"
            );
            return Err(BuildError::SphinxFailed {
                exit_code: outcome.exit_code,
                stderr_path: outcome.stderr_path,
            });
        }

        let xml = workspace.read_output()?;
        let root = parse_xml(&xml)?;
        let groups = group_by_module(collect_descriptions(&root));

        let modules: BTreeSet<String> = document
            .pending_nodes()
            .map(|node| node.module().to_owned())
            .collect();
        let mut translated: HashMap<String, Vec<Node>> = HashMap::new();
        let mut missing_modules = Vec::new();
        for module in modules {
            match groups.get(&module) {
                Some(bucket) => {
                    let nodes = translate_all(bucket)?;
                    tracing::debug!(module = %module, descriptions = bucket.len(), "Translated module");
                    translated.insert(module, nodes);
                }
                None => {
                    tracing::warn!(module = %module, "Module not found in Sphinx output");
                    missing_modules.push(module);
                }
            }
        }

        let filled = fan_out(document, &translated);

        let workdir = self.keep_workdir.then(|| workspace.keep());
        if let Some(dir) = &workdir {
            tracing::info!(workdir = %dir.display(), "Kept working directory");
        }

        tracing::info!(filled, modules = translated.len(), "Autodoc build finished");
        Ok(BuildReport {
            requests: requests.len(),
            filled,
            missing_modules,
            dropped: groups.dropped(),
            workdir,
        })
    }
}

/// Copy each module's translation into every pending node requesting it.
fn fan_out(document: &mut Document, translated: &HashMap<String, Vec<Node>>) -> usize {
    let mut filled = 0;
    for node in document.pending_nodes_mut() {
        if let Some(children) = translated.get(node.module()) {
            fill(node, children.clone());
            filled += 1;
        }
    }
    filled
}

fn fill(node: &mut PendingNode, children: Vec<Node>) {
    tracing::debug!(module = node.module(), line = node.line(), "Filling pending node");
    node.replace_children(children);
}
