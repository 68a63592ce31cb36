//! Render cache key computation.
//!
//! Provides [`RenderKey`] for building render-result cache keys.

use crate::theme::Theme;

/// Render parameters for cache key computation.
///
/// Contains everything that affects the rendered output. The block id
/// already embeds a content hash, so the source itself is not part of the key.
#[derive(Debug, Clone, Copy)]
pub struct RenderKey<'a> {
    /// Stable block identity (content hash + position).
    pub block_id: &'a str,
    /// Theme the artifact is painted with.
    pub theme: Theme,
}

impl RenderKey<'_> {
    /// Cache key for this render.
    ///
    /// # Key Format
    ///
    /// `"{block_id}:{theme}"`, e.g. `"1x2y3z-0:hand-drawn"`.
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!("{}:{}", self.block_id, self.theme.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_key_format() {
        let key = RenderKey {
            block_id: "abc-0",
            theme: Theme::Simple,
        };
        assert_eq!(key.cache_key(), "abc-0:simple");
    }

    #[test]
    fn test_render_key_theme_matters() {
        let simple = RenderKey {
            block_id: "abc-0",
            theme: Theme::Simple,
        };
        let hand_drawn = RenderKey {
            theme: Theme::HandDrawn,
            ..simple
        };

        assert_ne!(simple.cache_key(), hand_drawn.cache_key());
    }

    #[test]
    fn test_render_key_block_matters() {
        let first = RenderKey {
            block_id: "abc-0",
            theme: Theme::Simple,
        };
        let second = RenderKey {
            block_id: "abc-1",
            ..first
        };

        assert_ne!(first.cache_key(), second.cache_key());
    }
}
