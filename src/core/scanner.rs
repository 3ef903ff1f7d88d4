//! Byte scanner for markup delimiters
//!
//! Thin cursor over the input slice. All delimiter searches go through
//! memchr, which picks SSE2/AVX2/NEON at runtime.

use memchr::{memchr, memmem};

/// Position-tracking scanner over a byte slice
pub struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Scanner { input, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.input.len());
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.input.len()
    }

    /// Slice of the input between two absolute positions
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'a [u8] {
        &self.input[start..end]
    }

    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    #[inline]
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    #[inline]
    pub fn starts_with(&self, needle: &[u8]) -> bool {
        self.input[self.pos..].starts_with(needle)
    }

    /// Absolute position of the next '<'
    #[inline]
    pub fn find_tag_start(&self) -> Option<usize> {
        memchr(b'<', &self.input[self.pos..]).map(|i| self.pos + i)
    }

    /// Absolute position of the next '>' that is not inside a quoted attribute value
    pub fn find_tag_end_quoted(&self) -> Option<usize> {
        let mut quote: Option<u8> = None;

        for (i, &b) in self.input[self.pos..].iter().enumerate() {
            match (quote, b) {
                (None, b'"' | b'\'') => quote = Some(b),
                (Some(q), _) if q == b => quote = None,
                (None, b'>') => return Some(self.pos + i),
                _ => {}
            }
        }
        None
    }

    /// Absolute position of the next occurrence of `needle` (e.g. `-->`, `]]>`)
    #[inline]
    pub fn find_sequence(&self, needle: &[u8]) -> Option<usize> {
        memmem::find(&self.input[self.pos..], needle).map(|i| self.pos + i)
    }

    /// Read an XML name at the current position and advance past it
    pub fn read_name(&mut self) -> Option<&'a [u8]> {
        let start = self.pos;
        let first = *self.input.get(start)?;
        if !is_name_start_char(first) {
            return None;
        }

        self.pos += 1;
        while self.pos < self.input.len() && is_name_char(self.input[self.pos]) {
            self.pos += 1;
        }

        Some(&self.input[start..self.pos])
    }
}

/// ASCII letters, underscore, colon; anything non-ASCII is accepted as part of a UTF-8 name
#[inline]
pub fn is_name_start_char(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':') || b >= 0x80
}

#[inline]
pub fn is_name_char(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' | b'.' | b':') || b >= 0x80
}

#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_tag_start() {
        let scanner = Scanner::new(b"hello <world>");
        assert_eq!(scanner.find_tag_start(), Some(6));
    }

    #[test]
    fn test_find_tag_end_skips_quoted_gt() {
        let scanner = Scanner::new(b"<a attr=\">test\" b='>'>content");
        assert_eq!(scanner.find_tag_end_quoted(), Some(21));
    }

    #[test]
    fn test_find_sequence() {
        let mut scanner = Scanner::new(b"<!-- a -- b -->rest");
        scanner.advance(4);
        assert_eq!(scanner.find_sequence(b"-->"), Some(12));
    }

    #[test]
    fn test_read_name() {
        let mut scanner = Scanner::new(b"svg:rect-1 x=\"0\"");
        assert_eq!(scanner.read_name(), Some(b"svg:rect-1" as &[u8]));
        assert_eq!(scanner.position(), 10);
        assert_eq!(scanner.read_name(), None);
    }

    #[test]
    fn test_advance_clamps_to_end() {
        let mut scanner = Scanner::new(b"ab");
        scanner.advance(10);
        assert!(scanner.is_eof());
        assert_eq!(scanner.peek(), None);
    }
}
