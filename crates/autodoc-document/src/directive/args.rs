//! Directive argument parsing.
//!
//! Parses the `[content]{key="value" flag}` syntax from directives.

use std::collections::HashMap;

/// Value recorded for a bare flag such as `{members}`.
pub const FLAG_PRESENT: &str = "true";

/// Parsed arguments from directive syntax.
///
/// Represents the content and attributes extracted from a directive:
/// `::name[content]{key="value" flag}`
///
/// # Example
///
/// ```
/// use autodoc_document::directive::DirectiveArgs;
///
/// let args = DirectiveArgs::parse("pkg.mod", r#"members private-members="_hidden""#);
/// assert_eq!(args.content, "pkg.mod");
/// assert_eq!(args.get("members"), Some("true"));
/// assert_eq!(args.get("private-members"), Some("_hidden"));
/// ```
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DirectiveArgs {
    /// Content from brackets: `[content]` (empty string if not provided).
    pub content: String,
    /// Key-value attributes. Bare flags map to [`FLAG_PRESENT`].
    pub attrs: HashMap<String, String>,
}

impl DirectiveArgs {
    /// Parse content and attributes string into structured arguments.
    ///
    /// # Arguments
    ///
    /// * `content` - The content from brackets `[content]`
    /// * `attrs_str` - The attributes string from braces `{...}` (without braces)
    #[must_use]
    pub fn parse(content: &str, attrs_str: &str) -> Self {
        let mut args = Self {
            content: content.trim().to_owned(),
            ..Default::default()
        };

        let mut remaining = attrs_str.trim();

        while !remaining.is_empty() {
            if let Some((key, value, rest)) = parse_key_value(remaining) {
                args.attrs.insert(key.to_owned(), value.to_owned());
                remaining = rest;
            } else if let Some((key, rest)) = parse_flag(remaining) {
                args.attrs.insert(key.to_owned(), FLAG_PRESENT.to_owned());
                remaining = rest;
            } else {
                // Skip unrecognized character
                let skip = remaining.chars().next().map_or(1, char::len_utf8);
                remaining = &remaining[skip..];
            }
            remaining = remaining.trim_start();
        }

        args
    }

    /// Get an attribute value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Attribute keys in sorted order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<_> = self.attrs.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

fn is_key_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

/// Parse a key-value pair from the attributes string.
///
/// Supports: `key="value"`, `key='value'`, `key=value`
fn parse_key_value(s: &str) -> Option<(&str, &str, &str)> {
    let key_end = s.find(|c: char| !is_key_char(c))?;
    let key = &s[..key_end];
    if key.is_empty() {
        return None;
    }

    let after_eq = s[key_end..].strip_prefix('=')?;

    if let Some(stripped) = after_eq.strip_prefix('"') {
        let end_quote = stripped.find('"')?;
        Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]))
    } else if let Some(stripped) = after_eq.strip_prefix('\'') {
        let end_quote = stripped.find('\'')?;
        Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]))
    } else {
        let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
        Some((key, &after_eq[..end], &after_eq[end..]))
    }
}

/// Parse a bare flag: a key followed by whitespace or end of input.
fn parse_flag(s: &str) -> Option<(&str, &str)> {
    let end = s.find(|c: char| !is_key_char(c)).unwrap_or(s.len());
    let key = &s[..end];
    let rest = &s[end..];
    if key.is_empty() || !(rest.is_empty() || rest.starts_with(char::is_whitespace)) {
        return None;
    }
    Some((key, rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_args() {
        let args = DirectiveArgs::parse("", "");
        assert_eq!(args.content, "");
        assert!(args.attrs.is_empty());
    }

    #[test]
    fn test_content_is_trimmed() {
        let args = DirectiveArgs::parse("  pkg.mod ", "");
        assert_eq!(args.content, "pkg.mod");
    }

    #[test]
    fn test_bare_flag() {
        let args = DirectiveArgs::parse("", "members");
        assert_eq!(args.get("members"), Some(FLAG_PRESENT));
    }

    #[test]
    fn test_multiple_bare_flags() {
        let args = DirectiveArgs::parse("", "members undoc-members  special-members");
        assert_eq!(
            args.keys(),
            vec!["members", "special-members", "undoc-members"]
        );
    }

    #[test]
    fn test_double_quoted_value() {
        let args = DirectiveArgs::parse("", r#"members="run, stop""#);
        assert_eq!(args.get("members"), Some("run, stop"));
    }

    #[test]
    fn test_single_quoted_value() {
        let args = DirectiveArgs::parse("", "private-members='_a'");
        assert_eq!(args.get("private-members"), Some("_a"));
    }

    #[test]
    fn test_unquoted_value() {
        let args = DirectiveArgs::parse("", "members=run undoc-members");
        assert_eq!(args.get("members"), Some("run"));
        assert_eq!(args.get("undoc-members"), Some(FLAG_PRESENT));
    }

    #[test]
    fn test_empty_quoted_value() {
        let args = DirectiveArgs::parse("", r#"members="""#);
        assert_eq!(args.get("members"), Some(""));
    }

    #[test]
    fn test_unrecognized_characters_skipped() {
        let args = DirectiveArgs::parse("", "#id .class members");
        assert_eq!(args.get("members"), Some(FLAG_PRESENT));
        assert_eq!(args.get("id"), Some(FLAG_PRESENT));
        assert_eq!(args.get("class"), Some(FLAG_PRESENT));
    }

    #[test]
    fn test_get_nonexistent() {
        let args = DirectiveArgs::parse("", "members");
        assert_eq!(args.get("undoc-members"), None);
    }
}
