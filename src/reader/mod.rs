//! XML Reader Module
//!
//! - SliceReader: zero-copy pull reader over an in-memory document
//! - Events: XML event types for pull parsing

pub mod events;
pub mod slice;

pub use events::{EndElement, StartElement, XmlEvent};
pub use slice::SliceReader;
