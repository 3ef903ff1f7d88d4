//! Token cursor interface
//!
//! The traversal engine only ever talks to an [`XmlCursor`]: a single
//! forward-only position in a token stream with no look-ahead. Two
//! implementations ship with the crate:
//!
//! - [`SliceCursor`]: tokenizes an in-memory document
//! - [`TokenCursor`]: replays a pre-built list of [`Node`]s
//!
//! ```text
//! &[u8] -> Tokenizer -> SliceReader -> SliceCursor --+
//!                                                    +--> Scope::execute
//!                      Vec<Node<'static>> -> TokenCursor --+
//! ```

use crate::error::ParseError;

mod node;
mod recorded;
mod slice;

pub use node::Node;
pub use recorded::TokenCursor;
pub use slice::SliceCursor;

/// Classification of the token under the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// `<name ...>` or `<name .../>`
    ElementStart,
    /// `</name>`
    ElementEnd,
    Text,
    /// `<![CDATA[...]]>`
    CharacterData,
    /// Comments, processing instructions, declarations, ignorable whitespace,
    /// and the synthetic position before the first token.
    Other,
}

/// A forward-only cursor over a token stream.
///
/// Accessors describe the *current* token only. `name` is defined for
/// element start/end tokens, `value` for Text/CharacterData, and
/// `is_self_closing` for element starts; elsewhere they return `None`/`false`.
///
/// Attribute access is index based and never moves the cursor, so iterating
/// attributes and looking them up by name can be freely interleaved.
pub trait XmlCursor {
    fn kind(&self) -> NodeKind;

    fn name(&self) -> Option<&str>;

    fn value(&self) -> Option<&str>;

    fn is_self_closing(&self) -> bool;

    /// Attribute value by exact (prefix-included) name
    fn attribute(&self, name: &str) -> Option<&str>;

    fn attribute_count(&self) -> usize;

    /// The `index`-th attribute in document order
    fn attribute_at(&self, index: usize) -> Option<(&str, &str)>;

    /// Move to the next token. Returns `false` once input is exhausted,
    /// and keeps returning `false` afterwards.
    fn advance(&mut self) -> bool;

    /// Why the stream ended early, if it did. Cursors that cannot detect
    /// malformed input leave this as `None`.
    fn error(&self) -> Option<&ParseError> {
        None
    }

    /// Call `f` with every attribute of the current token, in document order.
    fn for_each_attribute(&self, f: &mut dyn FnMut(&str, &str)) {
        for index in 0..self.attribute_count() {
            if let Some((name, value)) = self.attribute_at(index) {
                f(name, value);
            }
        }
    }
}

impl<'c> dyn XmlCursor + 'c {
    /// Iterator over the current token's attributes
    pub fn attributes(&self) -> Attributes<'_> {
        Attributes {
            cursor: self,
            index: 0,
        }
    }
}

/// Iterator over `(name, value)` pairs of the current token
pub struct Attributes<'a> {
    cursor: &'a dyn XmlCursor,
    index: usize,
}

impl<'a> Iterator for Attributes<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let attr = self.cursor.attribute_at(self.index)?;
        self.index += 1;
        Some(attr)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cursor.attribute_count().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_iteration_does_not_disturb_lookup() {
        let mut cursor = TokenCursor::new(vec![Node::start("contact")
            .with_attribute("id", "1")
            .with_attribute("externalid", "2")]);
        assert!(cursor.advance());

        let node: &dyn XmlCursor = &cursor;
        let mut iter = node.attributes();
        assert_eq!(iter.size_hint(), (2, Some(2)));
        assert_eq!(iter.next(), Some(("id", "1")));
        assert_eq!(node.attribute("externalid"), Some("2"));
        assert_eq!(iter.next(), Some(("externalid", "2")));
        assert_eq!(iter.next(), None);
        assert_eq!(node.attribute("id"), Some("1"));

        let mut seen = Vec::new();
        node.for_each_attribute(&mut |k, v| seen.push(format!("{k}={v}")));
        assert_eq!(seen, ["id=1", "externalid=2"]);
    }
}
