//! Parse errors reported by the token cursor.
//!
//! The traversal engine itself never fails; it only observes the cursor
//! running out of tokens. A strict cursor that stops on malformed input
//! records one of these so the caller can tell truncation from bad markup.

use thiserror::Error;

/// Result type alias for cursor-level operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// What went wrong while tokenizing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unclosed markup construct")]
    UnclosedMarkup,

    #[error("unclosed comment")]
    UnclosedComment,

    #[error("unclosed CDATA section")]
    UnclosedCData,

    #[error("unclosed processing instruction")]
    UnclosedProcessingInstruction,

    #[error("invalid element name")]
    InvalidName,

    #[error("mismatched end tag: expected </{expected}>, found </{found}>")]
    MismatchedEndTag { expected: String, found: String },

    #[error("end tag </{0}> has no matching start tag")]
    UnexpectedEndTag(String),

    #[error("end of input with unclosed element <{0}>")]
    UnclosedElement(String),

    #[error("{0}")]
    Attribute(&'static str),

    #[error("{0}")]
    Entity(&'static str),

    #[error("invalid UTF-8")]
    InvalidUtf8,
}

/// A strict-mode tokenizer failure and the byte offset it was detected at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at byte {position}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: usize) -> Self {
        ParseError { kind, position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_position() {
        let err = ParseError::new(
            ParseErrorKind::MismatchedEndTag {
                expected: "a".into(),
                found: "b".into(),
            },
            12,
        );
        assert_eq!(
            err.to_string(),
            "mismatched end tag: expected </a>, found </b> at byte 12"
        );
    }

    #[test]
    fn test_static_message_kinds() {
        let err = ParseError::new(ParseErrorKind::Attribute("Attribute value must be quoted"), 3);
        assert_eq!(err.to_string(), "Attribute value must be quoted at byte 3");
    }
}
