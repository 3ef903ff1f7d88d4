use super::NodeKind;
use std::borrow::Cow;

/// Snapshot of one token: what an [`XmlCursor`](super::XmlCursor) exposes
/// while positioned on it.
///
/// `SliceCursor` fills these with borrowed strings where it can;
/// `TokenCursor` replays owned (`Node<'static>`) ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<'a> {
    pub kind: NodeKind,
    pub name: Option<Cow<'a, str>>,
    pub value: Option<Cow<'a, str>>,
    pub self_closing: bool,
    pub attributes: Vec<(Cow<'a, str>, Cow<'a, str>)>,
}

impl<'a> Node<'a> {
    /// A token of the given kind with nothing else set
    pub fn new(kind: NodeKind) -> Self {
        Node {
            kind,
            name: None,
            value: None,
            self_closing: false,
            attributes: Vec::new(),
        }
    }

    pub fn other() -> Self {
        Node::new(NodeKind::Other)
    }

    pub fn start(name: impl Into<Cow<'a, str>>) -> Self {
        Node {
            name: Some(name.into()),
            ..Node::new(NodeKind::ElementStart)
        }
    }

    /// `<name/>`
    pub fn empty(name: impl Into<Cow<'a, str>>) -> Self {
        Node {
            self_closing: true,
            ..Node::start(name)
        }
    }

    pub fn end(name: impl Into<Cow<'a, str>>) -> Self {
        Node {
            name: Some(name.into()),
            ..Node::new(NodeKind::ElementEnd)
        }
    }

    pub fn text(value: impl Into<Cow<'a, str>>) -> Self {
        Node {
            value: Some(value.into()),
            ..Node::new(NodeKind::Text)
        }
    }

    pub fn cdata(value: impl Into<Cow<'a, str>>) -> Self {
        Node {
            value: Some(value.into()),
            ..Node::new(NodeKind::CharacterData)
        }
    }

    pub fn with_attribute(
        mut self,
        name: impl Into<Cow<'a, str>>,
        value: impl Into<Cow<'a, str>>,
    ) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// First attribute with this name; duplicates only survive lenient parsing
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_ref())
    }

    pub fn attribute_at(&self, index: usize) -> Option<(&str, &str)> {
        self.attributes
            .get(index)
            .map(|(n, v)| (n.as_ref(), v.as_ref()))
    }

    pub fn into_owned(self) -> Node<'static> {
        Node {
            kind: self.kind,
            name: self.name.map(|n| Cow::Owned(n.into_owned())),
            value: self.value.map(|v| Cow::Owned(v.into_owned())),
            self_closing: self.self_closing,
            attributes: self
                .attributes
                .into_iter()
                .map(|(n, v)| (Cow::Owned(n.into_owned()), Cow::Owned(v.into_owned())))
                .collect(),
        }
    }
}
