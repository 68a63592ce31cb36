//! Render outcome types.

use serde::Serialize;

use crate::compiler::RenderedDiagram;
use crate::complexity::DiagramMetrics;
use crate::consts::{MAX_MESSAGES, MAX_PARTICIPANTS};
use crate::error::RenderError;

/// Final state of one render attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStatus {
    Success,
    Error,
    /// Source was empty or whitespace only. Informational, not a failure.
    Empty,
}

/// Outcome of a full render attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderResult {
    pub status: RenderStatus,
    /// Drawable artifact (success only).
    pub diagram: Option<RenderedDiagram>,
    /// Failure details (error only).
    pub error: Option<RenderError>,
    /// Complexity snapshot, attached to every outcome.
    pub metrics: DiagramMetrics,
}

impl RenderResult {
    #[must_use]
    pub fn success(diagram: RenderedDiagram, metrics: DiagramMetrics) -> Self {
        Self {
            status: RenderStatus::Success,
            diagram: Some(diagram),
            error: None,
            metrics,
        }
    }

    #[must_use]
    pub fn error(error: RenderError, metrics: DiagramMetrics) -> Self {
        Self {
            status: RenderStatus::Error,
            diagram: None,
            error: Some(error),
            metrics,
        }
    }

    /// Result for empty source, with zeroed metrics.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            status: RenderStatus::Empty,
            diagram: None,
            error: None,
            metrics: DiagramMetrics::default(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == RenderStatus::Success
    }

    /// Informational warning to show alongside a successful render of a
    /// diagram above the complexity thresholds.
    #[must_use]
    pub fn performance_warning(&self) -> Option<String> {
        if !self.is_success() || !self.metrics.exceeds_threshold {
            return None;
        }
        Some(format!(
            "Large diagram ({} participants, {} messages); diagrams above {MAX_PARTICIPANTS} participants or {MAX_MESSAGES} messages may render slowly.",
            self.metrics.participant_count, self.metrics.message_count,
        ))
    }
}
