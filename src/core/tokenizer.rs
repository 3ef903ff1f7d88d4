//! XML Tokenizer - pull tokenizer over a byte slice
//!
//! Splits input into markup and character data:
//! - Element start/end/empty tags
//! - Text content (raw, entities still encoded)
//! - CDATA sections
//! - Comments
//! - Processing instructions and the XML declaration
//! - DOCTYPE declarations (internal subset skipped, not interpreted)
//!
//! Lenient mode stops quietly at anything it cannot make sense of. Strict mode
//! also tracks open elements and records a [`ParseError`] for mismatched or
//! unclosed tags, after which no further tokens are produced.

use super::scanner::{is_whitespace, Scanner};
use crate::error::{ParseError, ParseErrorKind};

/// Type of XML token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Element start tag: <element>
    StartTag,
    /// Element end tag: </element>
    EndTag,
    /// Empty element: <element/>
    EmptyTag,
    /// Text content
    Text,
    /// CDATA section: <![CDATA[...]]>
    CData,
    /// Comment: <!--...-->
    Comment,
    /// Processing instruction: <?target ...?>
    ProcessingInstruction,
    /// XML declaration: <?xml ...?>
    XmlDeclaration,
    /// DOCTYPE declaration
    DocType,
}

/// A raw token; slices borrow from the input
#[derive(Debug, Clone)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Byte span in input (start, end)
    pub span: (usize, usize),
    /// Tag name or PI target
    pub name: Option<&'a [u8]>,
    /// Text/CDATA/comment/PI body
    pub content: Option<&'a [u8]>,
    /// Undecoded attribute area of a start/empty tag or XML declaration
    pub attributes: Option<&'a [u8]>,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind, span: (usize, usize)) -> Self {
        Token {
            kind,
            span,
            name: None,
            content: None,
            attributes: None,
        }
    }

    fn with_name(mut self, name: &'a [u8]) -> Self {
        self.name = Some(name);
        self
    }

    fn with_content(mut self, content: &'a [u8]) -> Self {
        self.content = Some(content);
        self
    }

    fn with_attributes(mut self, attributes: &'a [u8]) -> Self {
        self.attributes = Some(attributes);
        self
    }
}

pub struct Tokenizer<'a> {
    scanner: Scanner<'a>,
    strict: bool,
    done: bool,
    error: Option<ParseError>,
    /// Names of currently open elements (strict mode only)
    open: Vec<&'a [u8]>,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer for the given input (lenient mode)
    pub fn new(input: &'a [u8]) -> Self {
        Tokenizer {
            scanner: Scanner::new(input),
            strict: false,
            done: false,
            error: None,
            open: Vec::new(),
        }
    }

    /// Create a tokenizer in strict mode
    pub fn new_strict(input: &'a [u8]) -> Self {
        Tokenizer {
            strict: true,
            ..Tokenizer::new(input)
        }
    }

    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    pub fn position(&self) -> usize {
        self.scanner.position()
    }

    /// Get the next token, or None once input is exhausted (or a strict error was hit)
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        loop {
            if self.done {
                return None;
            }
            if self.scanner.is_eof() {
                return self.finish();
            }

            let token = if self.scanner.peek() == Some(b'<') {
                self.scan_markup()
            } else {
                Some(self.scan_text(self.scanner.position()))
            };

            // None here with !done means the markup was skipped in lenient mode
            if token.is_some() {
                return token;
            }
        }
    }

    fn finish(&mut self) -> Option<Token<'a>> {
        self.done = true;
        if let Some(name) = self.open.last() {
            let name = String::from_utf8_lossy(name).into_owned();
            let end = self.scanner.len();
            return self.fail(ParseErrorKind::UnclosedElement(name), end);
        }
        None
    }

    fn fail(&mut self, kind: ParseErrorKind, position: usize) -> Option<Token<'a>> {
        self.done = true;
        if self.strict && self.error.is_none() {
            self.error = Some(ParseError::new(kind, position));
        }
        None
    }

    /// Character data from `start` up to the next '<' (or end of input)
    fn scan_text(&mut self, start: usize) -> Token<'a> {
        self.scanner.set_position(start + 1);
        let end = self.scanner.find_tag_start().unwrap_or(self.scanner.len());
        self.scanner.set_position(end);
        Token::new(TokenKind::Text, (start, end)).with_content(self.scanner.slice(start, end))
    }

    fn scan_markup(&mut self) -> Option<Token<'a>> {
        let start = self.scanner.position();

        if self.scanner.starts_with(b"<!--") {
            return self.scan_delimited(
                start,
                4,
                b"-->",
                TokenKind::Comment,
                ParseErrorKind::UnclosedComment,
            );
        }
        if self.scanner.starts_with(b"<![CDATA[") {
            return self.scan_delimited(
                start,
                9,
                b"]]>",
                TokenKind::CData,
                ParseErrorKind::UnclosedCData,
            );
        }
        match self.scanner.peek_at(1) {
            Some(b'!') => self.scan_doctype(start),
            Some(b'?') => self.scan_pi(start),
            Some(b'/') => self.scan_end_tag(start),
            _ => self.scan_start_tag(start),
        }
    }

    fn scan_delimited(
        &mut self,
        start: usize,
        open_len: usize,
        close: &[u8],
        kind: TokenKind,
        unclosed: ParseErrorKind,
    ) -> Option<Token<'a>> {
        self.scanner.advance(open_len);
        let Some(close_pos) = self.scanner.find_sequence(close) else {
            return self.fail(unclosed, start);
        };
        let content = self.scanner.slice(start + open_len, close_pos);
        let end = close_pos + close.len();
        self.scanner.set_position(end);
        Some(Token::new(kind, (start, end)).with_content(content))
    }

    /// `<!DOCTYPE ...>`, skipping a bracketed internal subset and quoted literals
    fn scan_doctype(&mut self, start: usize) -> Option<Token<'a>> {
        let mut depth = 0usize;
        let mut quote: Option<u8> = None;
        let mut pos = start + 2;

        while pos < self.scanner.len() {
            let b = self.scanner.slice(pos, pos + 1)[0];
            match (quote, b) {
                (Some(q), _) if q == b => quote = None,
                (Some(_), _) => {}
                (None, b'"' | b'\'') => quote = Some(b),
                (None, b'[') => depth += 1,
                (None, b']') => depth = depth.saturating_sub(1),
                (None, b'>') if depth == 0 => {
                    self.scanner.set_position(pos + 1);
                    let content = self.scanner.slice(start + 2, pos);
                    return Some(
                        Token::new(TokenKind::DocType, (start, pos + 1)).with_content(content),
                    );
                }
                _ => {}
            }
            pos += 1;
        }
        self.fail(ParseErrorKind::UnclosedMarkup, start)
    }

    fn scan_pi(&mut self, start: usize) -> Option<Token<'a>> {
        self.scanner.advance(2);
        let Some(target) = self.scanner.read_name() else {
            if self.strict {
                return self.fail(ParseErrorKind::InvalidName, start + 2);
            }
            return self.skip_markup(start);
        };
        let Some(close_pos) = self.scanner.find_sequence(b"?>") else {
            return self.fail(ParseErrorKind::UnclosedProcessingInstruction, start);
        };

        let body = self.scanner.slice(self.scanner.position(), close_pos);
        let end = close_pos + 2;
        self.scanner.set_position(end);

        if target.eq_ignore_ascii_case(b"xml") {
            return Some(
                Token::new(TokenKind::XmlDeclaration, (start, end))
                    .with_name(target)
                    .with_attributes(body),
            );
        }

        let skip = body.iter().take_while(|&&b| is_whitespace(b)).count();
        Some(
            Token::new(TokenKind::ProcessingInstruction, (start, end))
                .with_name(target)
                .with_content(&body[skip..]),
        )
    }

    fn scan_end_tag(&mut self, start: usize) -> Option<Token<'a>> {
        self.scanner.advance(2);
        let Some(name) = self.scanner.read_name() else {
            if self.strict {
                return self.fail(ParseErrorKind::InvalidName, start + 2);
            }
            return self.skip_markup(start);
        };
        let Some(gt) = self.scanner.find_tag_end_quoted() else {
            return self.fail(ParseErrorKind::UnclosedMarkup, start);
        };
        self.scanner.set_position(gt + 1);

        if self.strict {
            match self.open.pop() {
                Some(open) if open == name => {}
                Some(open) => {
                    let kind = ParseErrorKind::MismatchedEndTag {
                        expected: String::from_utf8_lossy(open).into_owned(),
                        found: String::from_utf8_lossy(name).into_owned(),
                    };
                    return self.fail(kind, start);
                }
                None => {
                    let found = String::from_utf8_lossy(name).into_owned();
                    return self.fail(ParseErrorKind::UnexpectedEndTag(found), start);
                }
            }
        }

        Some(Token::new(TokenKind::EndTag, (start, gt + 1)).with_name(name))
    }

    fn scan_start_tag(&mut self, start: usize) -> Option<Token<'a>> {
        self.scanner.advance(1);
        let Some(name) = self.scanner.read_name() else {
            if self.strict {
                return self.fail(ParseErrorKind::InvalidName, start + 1);
            }
            // A stray '<' is just character data
            return Some(self.scan_text(start));
        };
        let name_end = self.scanner.position();
        let Some(gt) = self.scanner.find_tag_end_quoted() else {
            return self.fail(ParseErrorKind::UnclosedMarkup, start);
        };
        self.scanner.set_position(gt + 1);

        let is_empty = gt > name_end && self.scanner.slice(gt - 1, gt) == b"/";
        let attr_end = if is_empty { gt - 1 } else { gt };
        let attributes = self.scanner.slice(name_end, attr_end);

        let kind = if is_empty {
            TokenKind::EmptyTag
        } else {
            if self.strict {
                self.open.push(name);
            }
            TokenKind::StartTag
        };

        Some(
            Token::new(kind, (start, gt + 1))
                .with_name(name)
                .with_attributes(attributes),
        )
    }

    /// Lenient recovery: drop everything up to the next '>'
    fn skip_markup(&mut self, start: usize) -> Option<Token<'a>> {
        match self.scanner.find_tag_end_quoted() {
            Some(gt) => {
                self.scanner.set_position(gt + 1);
                None
            }
            None => self.fail(ParseErrorKind::UnclosedMarkup, start),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &[u8]) -> Vec<TokenKind> {
        let mut tokenizer = Tokenizer::new(input);
        std::iter::from_fn(|| tokenizer.next_token()).map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_document() {
        use TokenKind::*;
        assert_eq!(
            kinds(concat!(
                "<?xml version=\"1.0\"?><!DOCTYPE a [<!ENTITY x \"y\">]>",
                "<a k='v'>t<b/><![CDATA[<c>]]><!-- n --><?pi data?></a>"
            )
            .as_bytes()),
            vec![
                XmlDeclaration,
                DocType,
                StartTag,
                Text,
                EmptyTag,
                CData,
                Comment,
                ProcessingInstruction,
                EndTag
            ]
        );
    }

    #[test]
    fn test_token_contents() {
        let mut tokenizer = Tokenizer::new(b"<a id=\"1\">x &amp; y<![CDATA[<z>]]></a>");

        let start = tokenizer.next_token().unwrap();
        assert_eq!(start.name, Some(b"a" as &[u8]));
        assert_eq!(start.attributes, Some(b" id=\"1\"" as &[u8]));

        let text = tokenizer.next_token().unwrap();
        assert_eq!(text.content, Some(b"x &amp; y" as &[u8]));

        let cdata = tokenizer.next_token().unwrap();
        assert_eq!(cdata.kind, TokenKind::CData);
        assert_eq!(cdata.content, Some(b"<z>" as &[u8]));

        let end = tokenizer.next_token().unwrap();
        assert_eq!(end.kind, TokenKind::EndTag);
        assert_eq!(end.span, (34, 38));
        assert!(tokenizer.next_token().is_none());
    }

    #[test]
    fn test_empty_tag_with_gt_in_attribute() {
        let mut tokenizer = Tokenizer::new(b"<a title=\"x/>y\"/>");
        let token = tokenizer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::EmptyTag);
        assert_eq!(token.attributes, Some(b" title=\"x/>y\"" as &[u8]));
    }

    #[test]
    fn test_lenient_truncation_is_silent() {
        let mut tokenizer = Tokenizer::new(b"<a><b>x</b><c>y");
        assert_eq!(std::iter::from_fn(|| tokenizer.next_token()).count(), 6);
        assert!(tokenizer.error().is_none());
    }

    #[test]
    fn test_lenient_stray_lt_is_text() {
        assert_eq!(
            kinds(b"<a>1 < 2</a>"),
            vec![TokenKind::StartTag, TokenKind::Text, TokenKind::Text, TokenKind::EndTag]
        );
    }

    #[test]
    fn test_strict_mismatched_end_tag() {
        let mut tokenizer = Tokenizer::new_strict(b"<a><b></a>");
        assert_eq!(std::iter::from_fn(|| tokenizer.next_token()).count(), 2);
        let err = tokenizer.error().unwrap();
        assert_eq!(err.position, 6);
        assert!(matches!(
            &err.kind,
            ParseErrorKind::MismatchedEndTag { expected, found } if expected == "b" && found == "a"
        ));
    }

    #[test]
    fn test_strict_unclosed_element() {
        let mut tokenizer = Tokenizer::new_strict(b"<a><b/>");
        assert_eq!(std::iter::from_fn(|| tokenizer.next_token()).count(), 2);
        assert_eq!(
            tokenizer.error().map(|e| &e.kind),
            Some(&ParseErrorKind::UnclosedElement("a".into()))
        );
    }

    #[test]
    fn test_strict_unclosed_comment() {
        let mut tokenizer = Tokenizer::new_strict(b"<a><!-- oops</a>");
        assert_eq!(std::iter::from_fn(|| tokenizer.next_token()).count(), 1);
        assert_eq!(tokenizer.error().map(|e| &e.kind), Some(&ParseErrorKind::UnclosedComment));
    }
}
