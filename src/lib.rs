//! xmllexer - Declarative rule trees driven over a streaming XML cursor
//!
//! Layers:
//! core:   byte-level scanning, entity decoding, attribute parsing, tokenizing
//! reader: zero-copy pull reader producing `XmlEvent`s
//! cursor: the `XmlCursor` seam the engine is written against
//! lexer:  `Scope` registries and the recursive traversal engine
//!
//! ```
//! use xmllexer::{Scope, SliceCursor};
//! use std::cell::RefCell;
//!
//! let names = RefCell::new(Vec::new());
//! let out = &names;
//! let mut root = Scope::new();
//! root.on_element("contact", move |contact| {
//!     contact.on_attribute_value("id", move |id| out.borrow_mut().push(id.map(str::to_owned)));
//! });
//!
//! let xml = br#"<contacts><contact id="1"/><contact/></contacts>"#;
//! assert!(!root.execute(&mut SliceCursor::new(xml)));
//! assert_eq!(*names.borrow(), [Some("1".to_owned()), None]);
//! ```

pub mod config;
pub mod core;
pub mod cursor;
pub mod error;
pub mod lexer;
pub mod reader;

pub use config::{ReaderConfig, WhitespaceHandling};
pub use cursor::{Node, NodeKind, SliceCursor, TokenCursor, XmlCursor};
pub use error::{ParseError, ParseErrorKind};
pub use lexer::{NameFilter, RuleKind, Scope};
