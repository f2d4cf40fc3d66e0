//! Markup parsing errors.

use thiserror::Error;

/// Error returned when a response body cannot be parsed into a document.
#[derive(Debug, Error)]
pub enum MarkupError {
    /// The underlying XML reader rejected the input.
    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The input ended while elements were still open.
    #[error("Unexpected end of document inside <{tag}>")]
    Unclosed {
        /// The innermost element left open.
        tag: String,
    },

    /// A second top-level element followed the document root.
    #[error("Document has more than one root element (found <{tag}>)")]
    MultipleRoots {
        /// The tag of the extra root.
        tag: String,
    },

    /// The input contained no element at all.
    #[error("Document is empty")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unclosed_error_names_the_tag() {
        let error = MarkupError::Unclosed {
            tag: "Items".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Unexpected end of document inside <Items>"
        );
    }

    #[test]
    fn test_empty_error_message() {
        assert_eq!(MarkupError::Empty.to_string(), "Document is empty");
    }
}
