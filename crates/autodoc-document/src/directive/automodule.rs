//! Interpretation of `::automodule` directives.

use std::sync::LazyLock;

use regex::Regex;

use super::DirectiveArgs;
use crate::error::DirectiveError;
use crate::pending::PendingNode;
use crate::request::{AutodocOption, AutodocRequest};

/// Directive name handled by [`interpret`].
pub const AUTOMODULE: &str = "automodule";

/// Dotted Python module path.
static MODULE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("invalid module path regex")
});

/// Validate and normalize one `::automodule` directive.
///
/// The bracket content is the module path. Known options are read from the
/// attributes and normalized (a bare flag becomes the empty string). Unknown
/// attributes are ignored here; see [`unknown_options`].
///
/// # Errors
///
/// Returns [`DirectiveError`] if the module argument is missing or is not a
/// dotted identifier.
///
/// # Example
///
/// ```
/// use autodoc_document::directive::{DirectiveArgs, interpret};
/// use autodoc_document::AutodocOption;
///
/// let args = DirectiveArgs::parse("pkg.mod", "members");
/// let node = interpret(&args, 1).unwrap();
/// assert_eq!(node.module(), "pkg.mod");
/// assert_eq!(node.request().option(AutodocOption::Members), Some(""));
/// ```
pub fn interpret(args: &DirectiveArgs, line: usize) -> Result<PendingNode, DirectiveError> {
    let module = args.content.as_str();
    if module.is_empty() {
        return Err(DirectiveError::MissingModule { line });
    }
    if !MODULE_PATH.is_match(module) {
        return Err(DirectiveError::InvalidModule {
            line,
            module: module.to_owned(),
        });
    }

    let request = AutodocOption::ALL
        .into_iter()
        .fold(AutodocRequest::new(module), |request, option| {
            match args.get(option.as_str()) {
                Some(raw) => request.with_option(option, raw),
                None => request,
            }
        });

    Ok(PendingNode::new(request, line))
}

/// Attribute keys that are not autodoc options, in sorted order.
#[must_use]
pub fn unknown_options(args: &DirectiveArgs) -> Vec<&str> {
    args.keys()
        .into_iter()
        .filter(|key| AutodocOption::parse(key).is_none())
        .collect()
}
