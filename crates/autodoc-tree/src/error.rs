//! Error types for description tree parsing and translation.

/// Error while parsing Sphinx XML output.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    /// XML parsing error.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Encoding error during XML parsing.
    #[error("encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// The input ended while an element was still open.
    #[error("unexpected end of XML inside <{element}>")]
    UnexpectedEof {
        /// Name of the innermost unclosed element.
        element: String,
    },

    /// The document contains no root element.
    #[error("XML document has no root element")]
    NoRoot,
}

/// Error while translating a description tree.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TranslateError {
    /// The element name is not in the translation allow-list.
    #[error("unknown description node <{name}>")]
    UnknownNode {
        /// Name of the offending element.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_xml;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_xml_error_keeps_detail() {
        let err = parse_xml("<document><desc></document>").unwrap_err();
        let message = err.to_string();

        assert!(matches!(err, ParseError::Xml(_)));
        assert!(message.starts_with("XML parse error: "), "{message}");
        assert!(message.len() > "XML parse error: ".len());
    }

    #[test]
    fn test_unexpected_eof_message() {
        let err = ParseError::UnexpectedEof {
            element: "desc_name".to_owned(),
        };
        assert_eq!(err.to_string(), "unexpected end of XML inside <desc_name>");
    }
}
