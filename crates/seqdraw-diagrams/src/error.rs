//! Error types for validation and rendering.
//!
//! Validation and compilation failures are reported as [`RenderError`] values
//! inside results, never as `Err`. The only failure that propagates is
//! [`RenderAborted`], which callers treat as "no result, nothing to show".

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Extracts a line number from compiler messages such as "Parse error on line 3".
static LINE_NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)line\s+(\d+)").unwrap());

pub(crate) const SUGGEST_ARROW_SYNTAX: &str =
    "Check arrow syntax (e.g. 'Alice->>Bob: Hello') and make sure each message has a colon before its text.";
pub(crate) const SUGGEST_MESSAGE_FORMAT: &str =
    "Messages use the format 'Sender->>Receiver: Message text'.";
pub(crate) const SUGGEST_CANCELLED: &str =
    "Rendering was cancelled; it will run again on the next update.";
pub(crate) const SUGGEST_GENERIC: &str =
    "Check the diagram syntax near the reported line.";

/// Category of a [`RenderError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderErrorKind {
    /// Malformed source, detected by the validator or the compiler.
    Syntax,
    /// The compiler accepted the source but produced nothing drawable.
    Render,
    /// Any other compiler failure.
    Unknown,
}

impl RenderErrorKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Syntax => "syntax",
            Self::Render => "render",
            Self::Unknown => "unknown",
        }
    }
}

/// A reportable failure with an optional source location and fix hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderError {
    pub kind: RenderErrorKind,
    pub message: String,
    /// 1-based source line, when known.
    pub line_number: Option<usize>,
    /// Human-actionable hint.
    pub suggestion: Option<String>,
}

impl RenderError {
    /// Create an error without location or suggestion.
    #[must_use]
    pub fn new(kind: RenderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            line_number: None,
            suggestion: None,
        }
    }

    /// Create a syntax error at a 1-based source line.
    #[must_use]
    pub fn syntax(message: impl Into<String>, line_number: usize) -> Self {
        Self::new(RenderErrorKind::Syntax, message).at_line(line_number)
    }

    #[must_use]
    pub fn at_line(mut self, line_number: usize) -> Self {
        self.line_number = Some(line_number);
        self
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(line) = self.line_number {
            write!(f, " (line {line})")?;
        }
        Ok(())
    }
}

impl std::error::Error for RenderError {}

/// Failure reported by a [`DiagramCompiler`](crate::DiagramCompiler).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CompileError {
    message: String,
}

impl CompileError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A render stopped at a cancellation checkpoint.
///
/// Not a user-facing failure: callers should drop the render silently.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("render aborted: {reason}")]
pub struct RenderAborted {
    pub reason: String,
}

/// Turn a compiler failure message into a [`RenderError`].
///
/// Picks up a `line N` reference when present and chooses a suggestion from
/// keywords in the message.
pub(crate) fn classify_compile_failure(message: &str) -> RenderError {
    let lower = message.to_lowercase();

    let (kind, suggestion) = if lower.contains("parse") || lower.contains("syntax") {
        (RenderErrorKind::Syntax, SUGGEST_ARROW_SYNTAX)
    } else if lower.contains("unexpected") {
        (RenderErrorKind::Syntax, SUGGEST_MESSAGE_FORMAT)
    } else if lower.contains("abort") {
        (RenderErrorKind::Unknown, SUGGEST_CANCELLED)
    } else {
        (RenderErrorKind::Unknown, SUGGEST_GENERIC)
    };

    let mut error = RenderError::new(kind, message).with_suggestion(suggestion);
    if let Some(line) = extract_line_number(message) {
        error = error.at_line(line);
    }
    error
}

fn extract_line_number(message: &str) -> Option<usize> {
    LINE_NUMBER_PATTERN
        .captures(message)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
