//! Recursive-descent traversal of a [`Scope`] tree over an [`XmlCursor`].
//!
//! A scope is entered with the cursor on its own token. Its node actions run
//! first; childless tokens (text, CDATA, self-closing elements) close
//! immediately. Otherwise the cursor is pulled forward until the matching
//! end tag, and every token that one or more child rules select is handed
//! to a freshly built nested scope, recursively.
//!
//! Exhaustion anywhere below aborts every scope on the active path. Each one
//! fires its close callback on the way out, innermost first.

use super::scope::{RuleKind, Scope};
use crate::cursor::{NodeKind, XmlCursor};
use crate::error::Result;

impl<'a> Scope<'a> {
    /// Drive this scope from the cursor's current token.
    ///
    /// Returns `true` when the scope's extent closed normally and `false` when
    /// the cursor ran out of tokens first. A root scope executed on a fresh
    /// cursor (positioned before the document) has no end tag to wait for, so
    /// it consumes the whole stream and returns `false`.
    ///
    /// Each matched element costs one level of native recursion. Untrusted input
    /// with very deep nesting can overflow the thread's stack; run such
    /// documents on a thread with a larger stack or reject them beforehand.
    pub fn execute(&mut self, cursor: &mut dyn XmlCursor) -> bool {
        execute(self, cursor)
    }

    /// [`execute`](Self::execute), then surface any parse error the cursor
    /// recorded while the rules were running.
    pub fn run(&mut self, cursor: &mut dyn XmlCursor) -> Result<bool> {
        let completed = execute(self, cursor);
        match cursor.error() {
            Some(err) => Err(err.clone()),
            None => Ok(completed),
        }
    }
}

/// Tokens a scope never descends into
#[inline]
fn is_childless(cursor: &dyn XmlCursor) -> bool {
    match cursor.kind() {
        NodeKind::Text | NodeKind::CharacterData | NodeKind::ElementEnd => true,
        NodeKind::ElementStart => cursor.is_self_closing(),
        NodeKind::Other => false,
    }
}

pub fn execute(scope: &mut Scope<'_>, cursor: &mut dyn XmlCursor) -> bool {
    for action in scope.actions.iter_mut() {
        action(&*cursor);
    }

    if is_childless(cursor) {
        log::trace!("scope {:?} closed: no children", cursor.kind());
        scope.close();
        return true;
    }

    let closing_name = match cursor.kind() {
        NodeKind::ElementStart => cursor.name().map(str::to_owned),
        _ => None,
    };
    log::trace!("scope entered: {:?}", closing_name.as_deref().unwrap_or("<document>"));

    let mut selected = Vec::with_capacity(scope.rules.len());

    while cursor.advance() {
        let kind = cursor.kind();

        // First end tag carrying the scope's name closes it, nesting is not tracked
        if kind == NodeKind::ElementEnd
            && closing_name.is_some()
            && cursor.name() == closing_name.as_deref()
        {
            log::trace!("scope closed: {:?}", closing_name.as_deref().unwrap_or_default());
            scope.close();
            return true;
        }

        let Some(rule_kind) = RuleKind::classify(kind) else {
            continue;
        };

        let name = cursor.name();
        selected.clear();
        selected.extend(
            scope
                .rules
                .iter()
                .enumerate()
                .filter(|(_, rule)| rule.matches(rule_kind, name))
                .map(|(index, _)| index),
        );

        if selected.is_empty() {
            continue;
        }

        // Rules sharing a token run as a pipeline: each nested scope starts
        // wherever the previous one left the cursor.
        for &index in &selected {
            let rule = &mut scope.rules[index];
            log::trace!("rule fired: {:?} {:?}", rule.kind, rule.name);
            let mut nested = Scope::new();
            (rule.builder)(&mut nested);
            if !execute(&mut nested, cursor) {
                log::debug!(
                    "scope aborted, input exhausted: {:?}",
                    closing_name.as_deref().unwrap_or("<document>")
                );
                scope.close();
                return false;
            }
        }
    }

    log::debug!(
        "scope aborted, input exhausted: {:?}",
        closing_name.as_deref().unwrap_or("<document>")
    );
    scope.close();
    false
}
