//! Text node type.

// =============================================================================
// Text
// =============================================================================

/// How text content is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextKind {
    /// Escaped on output (the normal case)
    #[default]
    Normal,
    /// Emitted verbatim, no escaping
    Raw,
}

/// Text content node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    /// Text content
    pub content: String,
    /// Serialization behavior
    pub kind: TextKind,
}

impl Text {
    /// Create a normal (escaped) text node.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: TextKind::Normal,
        }
    }

    /// Create a raw (unescaped) text node.
    pub fn raw(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: TextKind::Raw,
        }
    }

    /// Check if this text is serialized verbatim.
    pub fn is_raw(&self) -> bool {
        self.kind == TextKind::Raw
    }

    /// Check if text content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Text length in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if text is only whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.content.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_node() {
        let text = Text::new("  hello world  ");
        assert!(!text.is_empty());
        assert!(!text.is_whitespace());
        assert!(!text.is_raw());
        assert_eq!(text.len(), 15);
    }
}
