//! Reader configuration for [`SliceCursor`](crate::cursor::SliceCursor).

/// What to do with text nodes that contain nothing but XML whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WhitespaceHandling {
    /// Report whitespace-only text as `NodeKind::Other`, so it never reaches Text rules.
    #[default]
    Ignore,
    /// Report whitespace-only text as ordinary `NodeKind::Text`.
    Preserve,
}

/// Options controlling how markup is turned into cursor tokens.
///
/// ```
/// use xmllexer::{ReaderConfig, WhitespaceHandling};
///
/// let config = ReaderConfig::default()
///     .strict(true)
///     .whitespace(WhitespaceHandling::Preserve);
/// assert!(config.is_strict());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReaderConfig {
    strict: bool,
    whitespace: WhitespaceHandling,
    trim_text: bool,
}

impl ReaderConfig {
    /// Reject malformed markup instead of recovering from it.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn whitespace(mut self, handling: WhitespaceHandling) -> Self {
        self.whitespace = handling;
        self
    }

    /// Trim leading and trailing XML whitespace from Text/CharacterData values.
    pub fn trim_text(mut self, trim: bool) -> Self {
        self.trim_text = trim;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn whitespace_handling(&self) -> WhitespaceHandling {
        self.whitespace
    }

    pub fn trims_text(&self) -> bool {
        self.trim_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReaderConfig::default();
        assert!(!config.is_strict());
        assert_eq!(config.whitespace_handling(), WhitespaceHandling::Ignore);
        assert!(!config.trims_text());
    }

    #[test]
    fn test_setters_chain() {
        let config = ReaderConfig::default().trim_text(true).strict(true);
        assert!(config.trims_text());
        assert!(config.is_strict());
    }
}
