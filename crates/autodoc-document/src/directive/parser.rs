//! Leaf directive syntax parsing.
//!
//! A leaf directive occupies a whole line: `::name[content]{attrs}`.

use super::DirectiveArgs;

/// Directive parsed from one line.
#[derive(Debug, PartialEq, Eq)]
pub struct ParsedDirective {
    /// Directive name (`automodule`).
    pub name: String,
    /// Bracket content and attributes.
    pub args: DirectiveArgs,
}

/// Parse a line as a leaf directive.
///
/// Returns `None` unless the trimmed line starts with exactly two colons, a
/// valid name, and has nothing but whitespace after the closing brace or
/// bracket.
pub fn parse_leaf_line(line: &str) -> Option<ParsedDirective> {
    let trimmed = line.trim();
    let after_colons = trimmed.strip_prefix("::")?;
    if after_colons.starts_with(':') {
        return None;
    }

    let name_end = after_colons
        .find(|c: char| c == '[' || c == '{' || c.is_whitespace())
        .unwrap_or(after_colons.len());
    let name = &after_colons[..name_end];
    if !is_valid_directive_name(name) {
        return None;
    }

    let rest = &after_colons[name_end..];
    let (content, content_len) = parse_delimited(rest, '[', ']')?;
    let rest = &rest[content_len..];
    let (attrs, attrs_len) = parse_delimited(rest, '{', '}')?;
    if !rest[attrs_len..].trim().is_empty() {
        return None;
    }

    Some(ParsedDirective {
        name: name.to_owned(),
        args: DirectiveArgs::parse(content, attrs),
    })
}

/// Valid names contain only alphanumeric characters, hyphens, and underscores.
fn is_valid_directive_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// Parse an optional delimited group such as `[content]`, handling nesting.
///
/// Returns the inner text and the number of bytes consumed. A missing group
/// yields `("", 0)`; an unterminated one yields `None`.
fn parse_delimited(s: &str, open: char, close: char) -> Option<(&str, usize)> {
    if !s.starts_with(open) {
        return Some(("", 0));
    }

    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some((&s[open.len_utf8()..i], i + close.len_utf8()));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_leaf_directive() {
        let parsed = parse_leaf_line("::automodule[pkg.mod]{members}").unwrap();

        assert_eq!(parsed.name, "automodule");
        assert_eq!(parsed.args.content, "pkg.mod");
        assert_eq!(parsed.args.get("members"), Some("true"));
    }

    #[test]
    fn test_leaf_without_attrs() {
        let parsed = parse_leaf_line("  ::automodule[randomy]  ").unwrap();

        assert_eq!(parsed.args.content, "randomy");
        assert!(parsed.args.attrs.is_empty());
    }

    #[test]
    fn test_leaf_without_content() {
        let parsed = parse_leaf_line("::automodule{members}").unwrap();
        assert_eq!(parsed.args.content, "");
    }

    #[test]
    fn test_nested_brackets() {
        let parsed = parse_leaf_line("::x[a[b]c]").unwrap();
        assert_eq!(parsed.args.content, "a[b]c");
    }

    #[test]
    fn test_container_and_inline_rejected() {
        assert!(parse_leaf_line(":::automodule[pkg]").is_none());
        assert!(parse_leaf_line(":automodule[pkg]").is_none());
    }

    #[test]
    fn test_directive_must_own_the_line() {
        assert!(parse_leaf_line("see ::automodule[pkg]").is_none());
        assert!(parse_leaf_line("::automodule[pkg] trailing").is_none());
    }

    #[test]
    fn test_unterminated_group() {
        assert!(parse_leaf_line("::automodule[pkg").is_none());
        assert!(parse_leaf_line("::automodule[pkg]{members").is_none());
    }

    #[test]
    fn test_invalid_name() {
        assert!(parse_leaf_line("::[pkg]").is_none());
        assert!(parse_leaf_line("::auto.module[pkg]").is_none());
    }
}
