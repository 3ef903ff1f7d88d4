//! Scope: the rule registry attached to one node's extent.

use crate::cursor::{NodeKind, XmlCursor};
use std::fmt;

/// Runs once when the scope's node is first visited, before any children.
pub type NodeAction<'a> = Box<dyn FnMut(&dyn XmlCursor) + 'a>;

/// Populates a freshly created nested scope each time its rule matches.
pub type ScopeBuilder<'a> = Box<dyn FnMut(&mut Scope<'a>) + 'a>;

/// Runs when the scope's node extent ends, on every exit path.
pub type CloseCallback<'a> = Box<dyn FnMut() + 'a>;

/// Which tokens a child rule listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Element start tokens (self-closing included)
    Element,
    /// Text and CDATA tokens alike
    Text,
}

impl RuleKind {
    /// Map a token kind onto the rule kind it can trigger, if any
    #[inline]
    pub fn classify(kind: NodeKind) -> Option<RuleKind> {
        match kind {
            NodeKind::ElementStart => Some(RuleKind::Element),
            NodeKind::Text | NodeKind::CharacterData => Some(RuleKind::Text),
            NodeKind::ElementEnd | NodeKind::Other => None,
        }
    }
}

/// Element name a rule accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameFilter {
    /// Wildcard
    Any,
    /// Exact, prefix-included name
    Exact(String),
}

impl NameFilter {
    #[inline]
    pub fn accepts(&self, name: Option<&str>) -> bool {
        match self {
            NameFilter::Any => true,
            NameFilter::Exact(expected) => name == Some(expected.as_str()),
        }
    }
}

impl From<&str> for NameFilter {
    fn from(name: &str) -> Self {
        NameFilter::Exact(name.to_owned())
    }
}

impl From<String> for NameFilter {
    fn from(name: String) -> Self {
        NameFilter::Exact(name)
    }
}

impl From<Option<&str>> for NameFilter {
    fn from(name: Option<&str>) -> Self {
        name.map_or(NameFilter::Any, NameFilter::from)
    }
}

pub(crate) struct ChildRule<'a> {
    pub(crate) kind: RuleKind,
    pub(crate) name: NameFilter,
    pub(crate) builder: ScopeBuilder<'a>,
}

impl ChildRule<'_> {
    #[inline]
    pub(crate) fn matches(&self, kind: RuleKind, name: Option<&str>) -> bool {
        self.kind == kind && (kind == RuleKind::Text || self.name.accepts(name))
    }
}

/// Registry of actions, child rules and a close callback for one node.
///
/// The root scope is built by the caller; every other scope is created fresh
/// by the engine right before the matching rule's builder runs, and dropped
/// as soon as its traversal returns. Nothing registered on a scope outlives
/// that single activation, so state captured by its closures is per-match.
///
/// ```
/// use xmllexer::{RuleKind, Scope, SliceCursor};
/// use std::cell::RefCell;
///
/// let seen = RefCell::new(Vec::new());
/// let log = &seen;
/// let mut root = Scope::new();
/// root.add_child_rule(RuleKind::Element, "b", move |b| {
///     b.add_child_rule(RuleKind::Text, None, move |text| {
///         text.add_node_action(move |node| {
///             log.borrow_mut().push(node.value().unwrap_or_default().to_owned())
///         });
///     });
/// });
///
/// let mut cursor = SliceCursor::new(b"<a><b>x</b><b>y</b></a>");
/// root.execute(&mut cursor);
/// assert_eq!(*seen.borrow(), ["x", "y"]);
/// ```
pub struct Scope<'a> {
    pub(crate) actions: Vec<NodeAction<'a>>,
    pub(crate) rules: Vec<ChildRule<'a>>,
    pub(crate) on_close: Option<CloseCallback<'a>>,
}

impl<'a> Scope<'a> {
    pub fn new() -> Self {
        Scope {
            actions: Vec::new(),
            rules: Vec::new(),
            on_close: None,
        }
    }

    /// Append an action run against the scope's own token, in registration order.
    pub fn add_node_action(&mut self, action: impl FnMut(&dyn XmlCursor) + 'a) -> &mut Self {
        self.actions.push(Box::new(action));
        self
    }

    /// Append a child rule. Every rule matching a token fires, in registration
    /// order, each against its own fresh scope. Names are ignored for
    /// [`RuleKind::Text`].
    pub fn add_child_rule(
        &mut self,
        kind: RuleKind,
        name: impl Into<NameFilter>,
        builder: impl FnMut(&mut Scope<'a>) + 'a,
    ) -> &mut Self {
        let name = match kind {
            RuleKind::Element => name.into(),
            RuleKind::Text => NameFilter::Any,
        };
        self.rules.push(ChildRule {
            kind,
            name,
            builder: Box::new(builder),
        });
        self
    }

    /// Set the close callback, replacing any previous one.
    pub fn set_close_callback(&mut self, callback: impl FnMut() + 'a) -> &mut Self {
        self.on_close = Some(Box::new(callback));
        self
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn has_close_callback(&self) -> bool {
        self.on_close.is_some()
    }

    pub(crate) fn close(&mut self) {
        if let Some(callback) = self.on_close.as_mut() {
            callback();
        }
    }
}

impl Default for Scope<'_> {
    fn default() -> Self {
        Scope::new()
    }
}

impl fmt::Debug for Scope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("actions", &self.actions.len())
            .field(
                "rules",
                &self
                    .rules
                    .iter()
                    .map(|r| (r.kind, &r.name))
                    .collect::<Vec<_>>(),
            )
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(RuleKind::classify(NodeKind::ElementStart), Some(RuleKind::Element));
        assert_eq!(RuleKind::classify(NodeKind::Text), Some(RuleKind::Text));
        assert_eq!(RuleKind::classify(NodeKind::CharacterData), Some(RuleKind::Text));
        assert_eq!(RuleKind::classify(NodeKind::ElementEnd), None);
        assert_eq!(RuleKind::classify(NodeKind::Other), None);
    }

    #[test]
    fn test_name_filter() {
        assert!(NameFilter::Any.accepts(Some("x")));
        assert!(NameFilter::from("x").accepts(Some("x")));
        assert!(!NameFilter::from("x").accepts(Some("y")));
        assert!(!NameFilter::from("x").accepts(None));
        assert_eq!(NameFilter::from(None::<&str>), NameFilter::Any);
    }

    #[test]
    fn test_text_rules_ignore_names() {
        let mut scope = Scope::new();
        scope.add_child_rule(RuleKind::Text, "ignored", |_| {});
        assert_eq!(scope.rules[0].name, NameFilter::Any);
        assert!(scope.rules[0].matches(RuleKind::Text, None));
        assert!(!scope.rules[0].matches(RuleKind::Element, Some("ignored")));
    }

    #[test]
    fn test_registration() {
        let mut scope = Scope::new();
        scope
            .add_node_action(|_| {})
            .add_node_action(|_| {})
            .add_child_rule(RuleKind::Element, None, |_| {});
        assert_eq!(scope.action_count(), 2);
        assert_eq!(scope.rule_count(), 1);
        assert!(!scope.has_close_callback());
        assert!(scope.rules[0].matches(RuleKind::Element, Some("anything")));
    }

    #[test]
    fn test_close_callback_is_replaced() {
        let mut calls = Vec::new();
        {
            let calls = std::cell::RefCell::new(&mut calls);
            let mut scope = Scope::new();
            scope.set_close_callback(|| calls.borrow_mut().push("first"));
            scope.set_close_callback(|| calls.borrow_mut().push("second"));
            scope.close();
        }
        assert_eq!(calls, ["second"]);
    }
}
