//! Visual themes and the compiler rendering modes they map to.

use serde::{Deserialize, Serialize};

/// Visual theme selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    /// Clean, straight-edged rendering (default).
    #[default]
    Simple,
    /// Sketch-style rendering.
    HandDrawn,
}

impl Theme {
    /// Parse theme from its configuration name.
    ///
    /// Returns None if the name is not a known theme.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "simple" => Some(Self::Simple),
            "hand-drawn" => Some(Self::HandDrawn),
            _ => None,
        }
    }

    /// Return theme as string representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::HandDrawn => "hand-drawn",
        }
    }

    /// Compiler rendering mode for this theme.
    #[must_use]
    pub fn render_mode(self) -> RenderMode {
        match self {
            Self::Simple => RenderMode::Classic,
            Self::HandDrawn => RenderMode::HandDrawn,
        }
    }
}

/// Rendering mode understood by the diagram compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Classic,
    HandDrawn,
}

impl RenderMode {
    /// Mermaid `look` value for this mode.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::HandDrawn => "handDrawn",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_parse() {
        assert_eq!(Theme::parse("simple"), Some(Theme::Simple));
        assert_eq!(Theme::parse("hand-drawn"), Some(Theme::HandDrawn));
        assert_eq!(Theme::parse("handDrawn"), None);
        assert_eq!(Theme::parse("dark"), None);
        assert_eq!(Theme::parse(""), None);
    }

    #[test]
    fn test_theme_as_str_round_trips() {
        for theme in [Theme::Simple, Theme::HandDrawn] {
            assert_eq!(Theme::parse(theme.as_str()), Some(theme));
        }
    }

    #[test]
    fn test_theme_default() {
        assert_eq!(Theme::default(), Theme::Simple);
    }

    #[test]
    fn test_render_modes() {
        assert_eq!(Theme::Simple.render_mode(), RenderMode::Classic);
        assert_eq!(Theme::HandDrawn.render_mode(), RenderMode::HandDrawn);
        assert_eq!(RenderMode::Classic.as_str(), "classic");
        assert_eq!(RenderMode::HandDrawn.as_str(), "handDrawn");
    }

    #[test]
    fn test_theme_serde_names() {
        let json = serde_json::to_string(&Theme::HandDrawn).unwrap();
        assert_eq!(json, r#""hand-drawn""#);
        let parsed: Theme = serde_json::from_str(r#""simple""#).unwrap();
        assert_eq!(parsed, Theme::Simple);
    }
}
