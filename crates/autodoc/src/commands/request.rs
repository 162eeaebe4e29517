//! `autodoc request` command implementation.

use std::fs;
use std::path::PathBuf;

use autodoc_document::Document;
use autodoc_sphinx::RequestFile;
use clap::Args;
use console::Term;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the request command.
#[derive(Args)]
pub(crate) struct RequestArgs {
    /// Markdown file to inspect.
    file: PathBuf,
}

impl RequestArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let source = fs::read_to_string(&self.file).map_err(|e| CliError::file(&self.file, e))?;
        let parsed = Document::parse(&source);
        for warning in &parsed.warnings {
            output.warning(&format!("{}: {warning}", self.file.display()));
        }

        let requests = RequestFile::from_document(&parsed.document);
        if requests.is_empty() {
            output.info("No automodule directives found");
            return Ok(());
        }

        Term::stdout().write_str(&requests.render())?;
        Ok(())
    }
}
