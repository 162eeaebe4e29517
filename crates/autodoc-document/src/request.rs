//! Autodoc requests and their RST rendering.

use std::fmt;

use serde::Serialize;

use crate::directive::FLAG_PRESENT;

/// Autodoc option accepted by `::automodule`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AutodocOption {
    /// `:members:`
    Members,
    /// `:undoc-members:`
    UndocMembers,
    /// `:private-members:`
    PrivateMembers,
    /// `:special-members:`
    SpecialMembers,
}

impl AutodocOption {
    /// All options in the order they are written to the request file.
    pub const ALL: [Self; 4] = [
        Self::Members,
        Self::UndocMembers,
        Self::PrivateMembers,
        Self::SpecialMembers,
    ];

    /// Option name as written in directives and RST.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Members => "members",
            Self::UndocMembers => "undoc-members",
            Self::PrivateMembers => "private-members",
            Self::SpecialMembers => "special-members",
        }
    }

    /// Parse an option name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.as_str() == name)
    }
}

impl fmt::Display for AutodocOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize a raw option value.
///
/// A bare flag arrives as the boolean-true token and becomes the empty
/// string, which is how RST spells a flag option. Other values pass through.
///
/// # Example
///
/// ```
/// use autodoc_document::coerce_option;
///
/// assert_eq!(coerce_option(Some("true")), Some(String::new()));
/// assert_eq!(coerce_option(Some("run, stop")), Some("run, stop".to_owned()));
/// assert_eq!(coerce_option(None), None);
/// ```
#[must_use]
pub fn coerce_option(value: Option<&str>) -> Option<String> {
    value.map(|v| {
        if v == FLAG_PRESENT {
            String::new()
        } else {
            v.to_owned()
        }
    })
}

/// Request for autodoc output of one module.
///
/// Option values are already normalized (see [`coerce_option`]).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutodocRequest {
    module: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    members: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    undoc_members: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    private_members: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    special_members: Option<String>,
}

impl AutodocRequest {
    /// Create a request with no options.
    #[must_use]
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            members: None,
            undoc_members: None,
            private_members: None,
            special_members: None,
        }
    }

    /// Set an option from its raw directive value, applying [`coerce_option`].
    #[must_use]
    pub fn with_option(mut self, option: AutodocOption, raw: &str) -> Self {
        *self.slot(option) = coerce_option(Some(raw));
        self
    }

    /// Dotted module path.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Normalized value of an option, if present.
    #[must_use]
    pub fn option(&self, option: AutodocOption) -> Option<&str> {
        match option {
            AutodocOption::Members => self.members.as_deref(),
            AutodocOption::UndocMembers => self.undoc_members.as_deref(),
            AutodocOption::PrivateMembers => self.private_members.as_deref(),
            AutodocOption::SpecialMembers => self.special_members.as_deref(),
        }
    }

    fn slot(&mut self, option: AutodocOption) -> &mut Option<String> {
        match option {
            AutodocOption::Members => &mut self.members,
            AutodocOption::UndocMembers => &mut self.undoc_members,
            AutodocOption::PrivateMembers => &mut self.private_members,
            AutodocOption::SpecialMembers => &mut self.special_members,
        }
    }

    /// Render the `automodule` directive block for the request file.
    ///
    /// The module line is followed by one three-space indented line per
    /// present option, in [`AutodocOption::ALL`] order. An empty value is
    /// written as a bare `:name:`.
    ///
    /// # Example
    ///
    /// ```
    /// use autodoc_document::{AutodocOption, AutodocRequest};
    ///
    /// let request = AutodocRequest::new("pkg.mod").with_option(AutodocOption::Members, "true");
    /// assert_eq!(request.render_rst(), ".. automodule:: pkg.mod\n   :members:");
    /// ```
    #[must_use]
    pub fn render_rst(&self) -> String {
        let mut out = format!(".. automodule:: {}", self.module);
        for option in AutodocOption::ALL {
            let Some(value) = self.option(option) else {
                continue;
            };
            out.push_str("\n   :");
            out.push_str(option.as_str());
            out.push(':');
            if !value.is_empty() {
                out.push(' ');
                out.push_str(value);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flag_coerces_to_empty() {
        let request = AutodocRequest::new("pkg").with_option(AutodocOption::Members, "true");
        assert_eq!(request.option(AutodocOption::Members), Some(""));
    }

    #[test]
    fn test_explicit_value_unchanged() {
        let request =
            AutodocRequest::new("pkg").with_option(AutodocOption::PrivateMembers, "_a, _b");
        assert_eq!(request.option(AutodocOption::PrivateMembers), Some("_a, _b"));
        assert_eq!(request.option(AutodocOption::Members), None);
    }

    #[test]
    fn test_render_members_only() {
        let request = AutodocRequest::new("pkg.mod").with_option(AutodocOption::Members, "");

        assert_eq!(request.render_rst(), ".. automodule:: pkg.mod\n   :members:");
    }

    #[test]
    fn test_render_fixed_option_order() {
        let request = AutodocRequest::new("pkg")
            .with_option(AutodocOption::SpecialMembers, "__call__")
            .with_option(AutodocOption::PrivateMembers, "true")
            .with_option(AutodocOption::UndocMembers, "true")
            .with_option(AutodocOption::Members, "run");

        assert_eq!(
            request.render_rst(),
            ".. automodule:: pkg\n   :members: run\n   :undoc-members:\n   :private-members:\n   :special-members: __call__"
        );
    }

    #[test]
    fn test_render_no_options() {
        assert_eq!(
            AutodocRequest::new("randomy").render_rst(),
            ".. automodule:: randomy"
        );
    }

    #[test]
    fn test_option_parse() {
        assert_eq!(
            AutodocOption::parse("undoc-members"),
            Some(AutodocOption::UndocMembers)
        );
        assert_eq!(AutodocOption::parse("inherited-members"), None);
    }

    #[test]
    fn test_serialize_skips_absent_options() {
        let request = AutodocRequest::new("pkg").with_option(AutodocOption::UndocMembers, "true");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"module": "pkg", "undocMembers": ""})
        );
    }
}
