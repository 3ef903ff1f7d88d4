use super::{Node, NodeKind, XmlCursor};
use crate::config::{ReaderConfig, WhitespaceHandling};
use crate::core::attributes::Attribute;
use crate::core::scanner::is_whitespace;
use crate::error::{ParseError, ParseErrorKind};
use crate::reader::{SliceReader, XmlEvent};
use std::borrow::Cow;

/// [`XmlCursor`] over an in-memory document.
///
/// Starts on a synthetic `Other` token before the first real one, so a root
/// scope can be executed on a freshly created cursor and will consume the
/// whole document.
///
/// ```
/// use xmllexer::{NodeKind, SliceCursor, XmlCursor};
///
/// let mut cursor = SliceCursor::new(b"<a id=\"5\"/>");
/// assert_eq!(cursor.kind(), NodeKind::Other);
/// assert!(cursor.advance());
/// assert_eq!(cursor.attribute("id"), Some("5"));
/// assert!(cursor.is_self_closing());
/// assert!(!cursor.advance());
/// ```
pub struct SliceCursor<'a> {
    reader: SliceReader<'a>,
    config: ReaderConfig,
    current: Node<'a>,
    exhausted: bool,
    error: Option<ParseError>,
}

impl<'a> SliceCursor<'a> {
    /// Lenient cursor with default settings
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_config(input, ReaderConfig::default())
    }

    pub fn new_strict(input: &'a [u8]) -> Self {
        Self::with_config(input, ReaderConfig::default().strict(true))
    }

    pub fn with_config(input: &'a [u8], config: ReaderConfig) -> Self {
        let reader = if config.is_strict() {
            SliceReader::new_strict(input)
        } else {
            SliceReader::new(input)
        };
        SliceCursor {
            reader,
            config,
            current: Node::other(),
            exhausted: false,
            error: None,
        }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn current(&self) -> &Node<'a> {
        &self.current
    }

    /// Convert a reader event into the node the cursor exposes.
    /// `None` means the event could not be represented (strict UTF-8 failure).
    fn load(&self, event: XmlEvent<'a>) -> Option<Node<'a>> {
        let node = match event {
            XmlEvent::StartElement(start) => self.element(start.name, start.attributes, false)?,
            XmlEvent::EmptyElement(start) => self.element(start.name, start.attributes, true)?,
            XmlEvent::EndElement(end) => Node {
                name: Some(self.text(end.name)?),
                ..Node::new(NodeKind::ElementEnd)
            },
            XmlEvent::Text(text) => {
                let ignorable = self.config.whitespace_handling() == WhitespaceHandling::Ignore
                    && text.iter().all(|&b| is_whitespace(b));
                let kind = if ignorable { NodeKind::Other } else { NodeKind::Text };
                Node {
                    value: Some(self.content(text)?),
                    ..Node::new(kind)
                }
            }
            XmlEvent::CData(text) => Node {
                value: Some(self.content(text)?),
                ..Node::new(NodeKind::CharacterData)
            },
            XmlEvent::Comment
            | XmlEvent::ProcessingInstruction
            | XmlEvent::XmlDeclaration
            | XmlEvent::DocType => Node::other(),
        };
        Some(node)
    }

    fn element(
        &self,
        name: Cow<'a, [u8]>,
        attributes: Vec<Attribute<'a>>,
        self_closing: bool,
    ) -> Option<Node<'a>> {
        let attributes = attributes
            .into_iter()
            .map(|a| Some((self.text(a.name)?, self.text(a.value)?)))
            .collect::<Option<Vec<_>>>()?;
        Some(Node {
            kind: NodeKind::ElementStart,
            name: Some(self.text(name)?),
            value: None,
            self_closing,
            attributes,
        })
    }

    /// Text/CDATA payload, trimmed when configured
    fn content(&self, bytes: Cow<'a, [u8]>) -> Option<Cow<'a, str>> {
        let text = self.text(bytes)?;
        if !self.config.trims_text() {
            return Some(text);
        }
        let trim = |c: char| matches!(c, ' ' | '\t' | '\n' | '\r');
        Some(match text {
            Cow::Borrowed(s) => Cow::Borrowed(s.trim_matches(trim)),
            Cow::Owned(s) => Cow::Owned(s.trim_matches(trim).to_owned()),
        })
    }

    /// Bytes to string: lossy when lenient, `None` on invalid UTF-8 when strict
    fn text(&self, bytes: Cow<'a, [u8]>) -> Option<Cow<'a, str>> {
        let strict = self.config.is_strict();
        match bytes {
            Cow::Borrowed(b) if strict => std::str::from_utf8(b).ok().map(Cow::Borrowed),
            Cow::Borrowed(b) => Some(String::from_utf8_lossy(b)),
            Cow::Owned(v) => match String::from_utf8(v) {
                Ok(s) => Some(Cow::Owned(s)),
                Err(_) if strict => None,
                Err(e) => Some(Cow::Owned(String::from_utf8_lossy(e.as_bytes()).into_owned())),
            },
        }
    }

    fn exhaust(&mut self) -> bool {
        self.exhausted = true;
        self.current = Node::other();
        false
    }
}

impl<'a> XmlCursor for SliceCursor<'a> {
    fn kind(&self) -> NodeKind {
        self.current.kind
    }

    fn name(&self) -> Option<&str> {
        self.current.name()
    }

    fn value(&self) -> Option<&str> {
        self.current.value()
    }

    fn is_self_closing(&self) -> bool {
        self.current.self_closing
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.current.attribute(name)
    }

    fn attribute_count(&self) -> usize {
        self.current.attributes.len()
    }

    fn attribute_at(&self, index: usize) -> Option<(&str, &str)> {
        self.current.attribute_at(index)
    }

    /// Parse error that ended the stream early (strict mode only)
    fn error(&self) -> Option<&ParseError> {
        self.error.as_ref().or_else(|| self.reader.error())
    }

    fn advance(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        let Some(event) = self.reader.next_event() else {
            return self.exhaust();
        };
        match self.load(event) {
            Some(node) => {
                self.current = node;
                true
            }
            None => {
                let position = self.reader.position();
                log::warn!("xml cursor stopped: invalid UTF-8 before byte {position}");
                self.error = Some(ParseError::new(ParseErrorKind::InvalidUtf8, position));
                self.exhaust()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(cursor: &mut SliceCursor<'_>) -> Vec<NodeKind> {
        std::iter::from_fn(|| cursor.advance().then(|| cursor.kind())).collect()
    }

    #[test]
    fn test_kind_mapping() {
        use NodeKind::*;
        let mut cursor =
            SliceCursor::new(b"<?xml version=\"1.0\"?><a>\n  <b/>x<![CDATA[y]]><!-- c --></a>");
        assert_eq!(
            kinds(&mut cursor),
            vec![Other, ElementStart, Other, ElementStart, Text, CharacterData, Other, ElementEnd]
        );
        assert!(cursor.error().is_none());
    }

    #[test]
    fn test_whitespace_preserved_when_configured() {
        let config = ReaderConfig::default().whitespace(WhitespaceHandling::Preserve);
        let mut cursor = SliceCursor::with_config(b"<a> </a>", config);
        assert!(cursor.advance());
        assert!(cursor.advance());
        assert_eq!(cursor.kind(), NodeKind::Text);
        assert_eq!(cursor.value(), Some(" "));
    }

    #[test]
    fn test_trim_text() {
        let config = ReaderConfig::default().trim_text(true);
        let mut cursor = SliceCursor::with_config(b"<a>\n  Steve &amp; co \n</a>", config);
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.value(), Some("Steve & co"));
    }

    #[test]
    fn test_element_accessors() {
        let mut cursor = SliceCursor::new(b"<contact id='1' externalid=\"2\">x</contact>");
        assert!(cursor.advance());
        assert_eq!(cursor.name(), Some("contact"));
        assert!(!cursor.is_self_closing());
        assert_eq!(cursor.attribute_count(), 2);
        assert_eq!(cursor.attribute_at(1), Some(("externalid", "2")));
        assert_eq!(cursor.attribute("id"), Some("1"));
        assert_eq!(cursor.value(), None);

        assert!(cursor.advance());
        assert_eq!(cursor.name(), None);
        assert_eq!(cursor.attribute_count(), 0);

        assert!(cursor.advance());
        assert_eq!(cursor.kind(), NodeKind::ElementEnd);
        assert_eq!(cursor.name(), Some("contact"));
    }

    #[test]
    fn test_lenient_invalid_utf8_is_lossy() {
        let mut cursor = SliceCursor::new(b"<a>\xFFz</a>");
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.value(), Some("\u{FFFD}z"));
    }

    #[test]
    fn test_strict_invalid_utf8_stops() {
        let mut cursor = SliceCursor::new_strict(b"<a>\xFFz</a>");
        assert!(cursor.advance());
        assert!(!cursor.advance());
        assert_eq!(cursor.kind(), NodeKind::Other);
        assert_eq!(cursor.error().map(|e| &e.kind), Some(&ParseErrorKind::InvalidUtf8));
        assert!(!cursor.advance());
    }

    #[test]
    fn test_strict_reader_error_is_reported() {
        let mut cursor = SliceCursor::new_strict(b"<a><b></a>");
        assert_eq!(kinds(&mut cursor).len(), 2);
        assert!(matches!(
            cursor.error().map(|e| &e.kind),
            Some(ParseErrorKind::MismatchedEndTag { .. })
        ));
    }
}
