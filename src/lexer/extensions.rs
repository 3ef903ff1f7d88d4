//! Shorthand registrations composed from the three scope primitives.
//!
//! Nothing here touches the engine. Every helper ends up as a node action, a
//! child rule or a close callback on the scope it is called on.

use super::scope::{NameFilter, RuleKind, Scope};
use crate::cursor::XmlCursor;
use std::cell::RefCell;
use std::rc::Rc;

impl<'a> Scope<'a> {
    /// Child rule for elements named exactly `name`.
    pub fn on_element(
        &mut self,
        name: &str,
        builder: impl FnMut(&mut Scope<'a>) + 'a,
    ) -> &mut Self {
        self.add_child_rule(RuleKind::Element, name, builder)
    }

    /// Child rule for every element, whatever its name.
    pub fn on_any_element(&mut self, builder: impl FnMut(&mut Scope<'a>) + 'a) -> &mut Self {
        self.add_child_rule(RuleKind::Element, NameFilter::Any, builder)
    }

    /// Child rule whose nested scope does nothing but run `action` on the
    /// matched token.
    pub fn on_node(
        &mut self,
        kind: RuleKind,
        name: impl Into<NameFilter>,
        action: impl FnMut(&dyn XmlCursor) + 'a,
    ) -> &mut Self {
        // Re-registered on every activation, so the one closure is shared
        let action = Rc::new(RefCell::new(action));
        self.add_child_rule(kind, name, move |scope| {
            let action = Rc::clone(&action);
            scope.add_node_action(move |node| (&mut *action.borrow_mut())(node));
        })
    }

    /// Text or CDATA content inside this scope's element.
    pub fn on_text(&mut self, mut action: impl FnMut(&str) + 'a) -> &mut Self {
        self.on_node(RuleKind::Text, NameFilter::Any, move |node| {
            action(node.value().unwrap_or_default())
        })
    }

    /// Text of a child element named `name`.
    ///
    /// ```
    /// use xmllexer::{Scope, SliceCursor};
    /// use std::cell::RefCell;
    ///
    /// let email = RefCell::new(String::new());
    /// let out = &email;
    /// let mut root = Scope::new();
    /// root.on_element("contact", move |contact| {
    ///     contact.on_element_text("email", move |text| out.borrow_mut().push_str(text));
    /// });
    /// root.execute(&mut SliceCursor::new(b"<contact><email>a@b.c</email></contact>"));
    /// assert_eq!(*email.borrow(), "a@b.c");
    /// ```
    pub fn on_element_text(&mut self, name: &str, action: impl FnMut(&str) + 'a) -> &mut Self {
        let action = Rc::new(RefCell::new(action));
        self.add_child_rule(RuleKind::Element, name, move |element| {
            let action = Rc::clone(&action);
            element.on_text(move |text| (&mut *action.borrow_mut())(text));
        })
    }

    /// Look up one attribute on this scope's own token. `action` always runs,
    /// with `None` when the attribute is absent.
    pub fn on_attribute_value(
        &mut self,
        name: &str,
        mut action: impl FnMut(Option<&str>) + 'a,
    ) -> &mut Self {
        let name = name.to_owned();
        self.add_node_action(move |node| action(node.attribute(&name)))
    }

    /// Every attribute on this scope's own token, in document order.
    pub fn on_attributes(&mut self, mut action: impl FnMut(&str, &str) + 'a) -> &mut Self {
        self.add_node_action(move |node| {
            for (name, value) in node.attributes() {
                action(name, value);
            }
        })
    }

    pub fn on_close(&mut self, callback: impl FnMut() + 'a) -> &mut Self {
        self.set_close_callback(callback)
    }
}
