use super::{Node, NodeKind, XmlCursor};
use std::collections::VecDeque;

/// Cursor that replays a pre-built token sequence.
///
/// Useful when tokens come from somewhere other than the bundled tokenizer,
/// and for driving rule trees over streams that are deliberately truncated
/// or otherwise hand-crafted.
#[derive(Debug, Clone)]
pub struct TokenCursor {
    pending: VecDeque<Node<'static>>,
    current: Node<'static>,
}

impl TokenCursor {
    /// Positioned before the first token; call `advance` to reach it.
    pub fn new(tokens: impl IntoIterator<Item = Node<'static>>) -> Self {
        TokenCursor {
            pending: tokens.into_iter().collect(),
            current: Node::other(),
        }
    }

    /// Tokens not yet reached
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn current(&self) -> &Node<'static> {
        &self.current
    }
}

impl XmlCursor for TokenCursor {
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

    fn advance(&mut self) -> bool {
        match self.pending.pop_front() {
            Some(node) => {
                self.current = node;
                true
            }
            None => {
                self.current = Node::other();
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_then_exhaust() {
        let mut cursor = TokenCursor::new(vec![Node::start("a"), Node::text("x"), Node::end("a")]);
        assert_eq!(cursor.kind(), NodeKind::Other);
        assert_eq!(cursor.remaining(), 3);

        assert!(cursor.advance());
        assert_eq!(cursor.name(), Some("a"));
        assert!(cursor.advance());
        assert_eq!(cursor.value(), Some("x"));
        assert!(cursor.advance());
        assert_eq!(cursor.kind(), NodeKind::ElementEnd);

        assert!(!cursor.advance());
        assert_eq!(cursor.kind(), NodeKind::Other);
        assert!(!cursor.advance());
    }
}
