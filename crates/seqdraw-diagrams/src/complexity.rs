//! Diagram complexity metrics.
//!
//! A cheap heuristic used to warn about diagrams that are likely slow or
//! unreadable. It gates a warning only, so approximate counts are fine.

use std::collections::HashSet;

use serde::Serialize;

use crate::consts::{MAX_MESSAGES, MAX_PARTICIPANTS};
use crate::syntax::{Declaration, Line, classify};

/// Complexity snapshot of one diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DiagramMetrics {
    /// Distinct participants, declared or referenced by messages.
    pub participant_count: usize,
    /// Non-blank lines that are not declarations, comments or the header.
    pub message_count: usize,
    /// Whether either count is above its threshold.
    pub exceeds_threshold: bool,
}

/// Compute complexity metrics for diagram source.
///
/// Pure and infallible; any input yields metrics.
#[must_use]
pub fn analyze_complexity(source: &str) -> DiagramMetrics {
    let mut participants = HashSet::new();
    let mut message_count = 0;

    for line in source.lines() {
        let line = classify(line);
        match line {
            Line::Participant(rest) => {
                let name = Declaration::parse(rest).short_name();
                if !name.is_empty() {
                    participants.insert(name);
                }
            }
            Line::Message(message) => {
                participants.extend(
                    [message.sender, message.receiver]
                        .into_iter()
                        .filter(|name| !name.is_empty()),
                );
            }
            _ => {}
        }

        let counts_as_content =
            !line.is_declaration() && !matches!(line, Line::Blank | Line::Comment | Line::Header);
        if counts_as_content {
            message_count += 1;
        }
    }

    let participant_count = participants.len();
    DiagramMetrics {
        participant_count,
        message_count,
        exceeds_threshold: participant_count > MAX_PARTICIPANTS || message_count > MAX_MESSAGES,
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_two_participants_two_messages() {
        let metrics = analyze_complexity("Alice->Bob: Hello\nBob->Alice: Hi");

        assert_eq!(
            metrics,
            DiagramMetrics {
                participant_count: 2,
                message_count: 2,
                exceeds_threshold: false,
            }
        );
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(analyze_complexity(""), DiagramMetrics::default());
        assert_eq!(analyze_complexity("  \n \n"), DiagramMetrics::default());
    }

    #[test]
    fn test_declarations_are_not_messages() {
        let source = "\
sequenceDiagram
title: Login
%% who talks to whom
participant Alice
participant Bob Builder as BB
Alice->>BB: Build it
";
        let metrics = analyze_complexity(source);

        assert_eq!(metrics.participant_count, 2);
        assert_eq!(metrics.message_count, 1);
    }

    #[test]
    fn test_declared_but_silent_participant_counts() {
        let metrics = analyze_complexity("participant Carol\nAlice->Bob: hi");
        assert_eq!(metrics.participant_count, 3);
    }

    #[test]
    fn test_participant_threshold() {
        let mut source = String::new();
        for i in 0..=MAX_PARTICIPANTS {
            writeln!(source, "participant P{i}").unwrap();
        }
        let metrics = analyze_complexity(&source);

        assert_eq!(metrics.participant_count, MAX_PARTICIPANTS + 1);
        assert!(metrics.exceeds_threshold);
    }

    #[test]
    fn test_message_threshold() {
        let at_limit = "A->B: ping\n".repeat(MAX_MESSAGES);
        assert!(!analyze_complexity(&at_limit).exceeds_threshold);

        let over_limit = "A->B: ping\n".repeat(MAX_MESSAGES + 1);
        let metrics = analyze_complexity(&over_limit);
        assert_eq!(metrics.message_count, MAX_MESSAGES + 1);
        assert_eq!(metrics.participant_count, 2);
        assert!(metrics.exceeds_threshold);
    }

    #[test]
    fn test_spaced_title_arrow_counts_as_message() {
        let metrics = analyze_complexity("title -> Bob: hi");
        assert_eq!(metrics.participant_count, 2);
        assert_eq!(metrics.message_count, 1);
    }

    #[test]
    fn test_idempotent() {
        let source = "participant A\nA->B: x\nnote over B: y\nB-->>A: z";
        assert_eq!(analyze_complexity(source), analyze_complexity(source));
    }

    #[test]
    fn test_degenerate_input() {
        let metrics = analyze_complexity("->\n-->>\n:::\n!!!");
        assert_eq!(metrics.participant_count, 0);
        assert_eq!(metrics.message_count, 4);
    }
}
