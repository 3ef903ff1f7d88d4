//! Declarative rule trees over a token cursor
//!
//! - Scope: per-node registry of actions, child rules and a close callback
//! - Engine: recursive execution of a scope tree (`Scope::execute`)
//! - Extensions: `on_element`, `on_text`, `on_attribute_value` and friends

mod engine;
mod extensions;
mod scope;

pub use engine::execute;
pub use scope::{CloseCallback, NameFilter, NodeAction, RuleKind, Scope, ScopeBuilder};
