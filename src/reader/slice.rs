//! Zero-copy slice reader
//!
//! Turns tokenizer output into [`XmlEvent`]s. Input references are kept
//! wherever no entity decoding was needed.

use super::events::{EndElement, StartElement, XmlEvent};
use crate::core::attributes::{parse_attributes, parse_attributes_strict, Attribute};
use crate::core::entities::{decode_text, decode_text_strict};
use crate::core::tokenizer::{Token, TokenKind, Tokenizer};
use crate::error::{ParseError, ParseErrorKind};
use std::borrow::Cow;

/// Pull reader over a byte slice
pub struct SliceReader<'a> {
    tokenizer: Tokenizer<'a>,
    strict: bool,
    error: Option<ParseError>,
}

impl<'a> SliceReader<'a> {
    /// Create a new slice reader (lenient mode)
    pub fn new(input: &'a [u8]) -> Self {
        SliceReader {
            tokenizer: Tokenizer::new(input),
            strict: false,
            error: None,
        }
    }

    /// Create a new slice reader in strict mode
    pub fn new_strict(input: &'a [u8]) -> Self {
        SliceReader {
            tokenizer: Tokenizer::new_strict(input),
            strict: true,
            error: None,
        }
    }

    /// Byte offset just past the last token read
    pub fn position(&self) -> usize {
        self.tokenizer.position()
    }

    /// The error that ended the event stream early (strict mode only)
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref().or_else(|| self.tokenizer.error())
    }

    /// Get the next XML event, or None at end of input
    pub fn next_event(&mut self) -> Option<XmlEvent<'a>> {
        if self.error.is_some() {
            return None;
        }
        let token = self.tokenizer.next_token()?;

        match token.kind {
            TokenKind::StartTag => {
                let attrs = self.tag_attributes(&token)?;
                Some(XmlEvent::StartElement(StartElement::new(token.name?, attrs)))
            }

            TokenKind::EmptyTag => {
                let attrs = self.tag_attributes(&token)?;
                Some(XmlEvent::EmptyElement(StartElement::new(token.name?, attrs)))
            }

            TokenKind::EndTag => Some(XmlEvent::EndElement(EndElement::new(token.name?))),

            TokenKind::Text => {
                let content = token.content?;
                let decoded = if self.strict {
                    match decode_text_strict(content) {
                        Ok(text) => text,
                        Err(msg) => return self.fail(ParseErrorKind::Entity(msg), token.span.0),
                    }
                } else {
                    decode_text(content)
                };
                Some(XmlEvent::Text(decoded))
            }

            TokenKind::CData => Some(XmlEvent::CData(Cow::Borrowed(token.content?))),

            TokenKind::Comment => Some(XmlEvent::Comment),

            TokenKind::ProcessingInstruction => Some(XmlEvent::ProcessingInstruction),

            TokenKind::XmlDeclaration => {
                if self.strict {
                    self.tag_attributes(&token)?;
                }
                Some(XmlEvent::XmlDeclaration)
            }

            TokenKind::DocType => Some(XmlEvent::DocType),
        }
    }

    fn tag_attributes(&mut self, token: &Token<'a>) -> Option<Vec<Attribute<'a>>> {
        let Some(area) = token.attributes else {
            return Some(Vec::new());
        };
        if !self.strict {
            return Some(parse_attributes(area));
        }
        match parse_attributes_strict(area) {
            Ok(attrs) => Some(attrs),
            Err(msg) => self.fail(ParseErrorKind::Attribute(msg), token.span.0),
        }
    }

    fn fail<T>(&mut self, kind: ParseErrorKind, position: usize) -> Option<T> {
        log::warn!("xml reader stopped: {kind} at byte {position}");
        self.error = Some(ParseError::new(kind, position));
        None
    }
}
