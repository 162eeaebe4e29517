//! Grouping of description nodes by module.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::xml::XmlElement;

/// Identifier of a module description: `module-<dotted.path>`.
static MODULE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^module-(.*)$").expect("invalid module id regex"));

/// Element name of a description node.
const DESC: &str = "desc";

/// Module key of a description node.
///
/// The key is taken from the `ids` attribute. docutils stores `ids` as a
/// space-separated list; the first entry of the form `module-<path>` wins.
///
/// # Example
///
/// ```
/// use autodoc_tree::{XmlElement, module_key};
///
/// let desc = XmlElement::new("desc").with_attr("ids", "module-pkg.mod");
/// assert_eq!(module_key(&desc), Some("pkg.mod"));
/// assert_eq!(module_key(&XmlElement::new("desc")), None);
/// ```
#[must_use]
pub fn module_key(element: &XmlElement) -> Option<&str> {
    let ids = element.attr("ids")?;
    ids.split_whitespace().find_map(|id| {
        MODULE_ID
            .captures(id)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    })
}

/// Collect the outermost `desc` elements below `root` in document order.
///
/// Descriptions nested inside another description (methods of a class, for
/// example) belong to their parent and are not returned separately.
#[must_use]
pub fn collect_descriptions(root: &XmlElement) -> Vec<&XmlElement> {
    let mut out = Vec::new();
    collect_into(root, &mut out);
    out
}

fn collect_into<'a>(element: &'a XmlElement, out: &mut Vec<&'a XmlElement>) {
    for child in element.elements() {
        if child.name == DESC {
            out.push(child);
        } else {
            collect_into(child, out);
        }
    }
}

/// Description nodes bucketed by module key.
#[derive(Debug, Default)]
pub struct ModuleGroups<'a> {
    groups: BTreeMap<String, Vec<&'a XmlElement>>,
    dropped: usize,
}

impl<'a> ModuleGroups<'a> {
    /// Descriptions of one module, in encounter order.
    #[must_use]
    pub fn get(&self, module: &str) -> Option<&[&'a XmlElement]> {
        self.groups.get(module).map(Vec::as_slice)
    }

    /// Whether the module has at least one description.
    #[must_use]
    pub fn contains(&self, module: &str) -> bool {
        self.groups.contains_key(module)
    }

    /// Module keys in sorted order.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Number of modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no description could be assigned to a module.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of descriptions without a module identifier.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

/// Partition description nodes by module key.
///
/// Buckets are append-only, so each preserves encounter order. Nodes without
/// a `module-` identifier are counted in [`ModuleGroups::dropped`] and appear
/// in no bucket.
pub fn group_by_module<'a>(
    descriptions: impl IntoIterator<Item = &'a XmlElement>,
) -> ModuleGroups<'a> {
    let mut groups = ModuleGroups::default();

    for desc in descriptions {
        match module_key(desc) {
            Some(module) => groups
                .groups
                .entry(module.to_owned())
                .or_default()
                .push(desc),
            None => groups.dropped += 1,
        }
    }

    if groups.dropped > 0 {
        tracing::debug!(
            dropped = groups.dropped,
            "Descriptions without module identifier"
        );
    }

    groups
}
