//! Core XML parsing primitives
//!
//! - Scanner: SIMD-accelerated delimiter detection using memchr
//! - Tokenizer: pull tokenizer for XML markup
//! - Entities: entity decoding with Cow (zero-copy when possible)
//! - Attributes: attribute list parsing

pub mod attributes;
pub mod entities;
pub mod scanner;
pub mod tokenizer;
