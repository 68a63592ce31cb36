//! Render request input.

use seqdraw_cache::content_hash;

/// One diagram block's raw source and its stable identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramSource {
    /// Raw diagram text.
    pub content: String,
    /// Stable identity combining a content hash and the block's position.
    pub block_id: String,
    /// Number of lines in `content`.
    pub line_count: usize,
}

impl DiagramSource {
    /// Create a source for the block at `position` in its document.
    ///
    /// The block id is `"{content_hash}-{position}"`, so identical blocks at
    /// different positions stay distinct.
    #[must_use]
    pub fn new(content: impl Into<String>, position: usize) -> Self {
        let content = content.into();
        let block_id = format!("{}-{position}", content_hash(&content));
        Self::with_block_id(content, block_id)
    }

    /// Create a source with a caller-chosen block id.
    #[must_use]
    pub fn with_block_id(content: impl Into<String>, block_id: impl Into<String>) -> Self {
        let content = content.into();
        let line_count = content.lines().count();
        Self {
            content,
            block_id: block_id.into(),
            line_count,
        }
    }

    /// Whether the content is empty or whitespace only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}
