//! Line classification for sequence-diagram source.
//!
//! The language is line oriented, so both the validator and the complexity
//! analyzer work from the same lexical view: each line is one of a handful of
//! [`Line`] shapes. Classification is purely lexical and never fails.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// `title: Text` (keyword is case-insensitive).
static TITLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^title\s*:(.*)$").unwrap());

/// `title Text` without the colon.
static BARE_TITLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^title(?:\s+(.*))?$").unwrap());

/// `participant ...` (keyword followed by whitespace or end of line).
static PARTICIPANT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^participant(?:\s+(.*))?$").unwrap());

/// Message arrows: `->`, `-->`, `->>`, `-->>`.
static ARROW_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{1,2}>{1,2}").unwrap());

/// The `as` keyword separating a display name from its alias.
static ALIAS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)as(?:\s|$)").unwrap());

/// Diagram-type header line.
const HEADER: &str = "sequenceDiagram";

/// Comment prefix.
const COMMENT_PREFIX: &str = "%%";

/// Lexical shape of one source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    /// Empty or whitespace only.
    Blank,
    /// `%%` comment.
    Comment,
    /// `sequenceDiagram` header.
    Header,
    /// `title: Text`; holds the trimmed text after the colon.
    Title(&'a str),
    /// `title Text` with the colon missing.
    MalformedTitle,
    /// `participant ...`; holds the trimmed text after the keyword.
    Participant(&'a str),
    /// A line containing a message arrow.
    Message(Message<'a>),
    /// Anything else (notes, blocks, activations).
    Other,
}

impl Line<'_> {
    /// Title and participant lines are declarations; they do not count as
    /// diagram content for complexity purposes.
    pub(crate) fn is_declaration(&self) -> bool {
        matches!(
            self,
            Self::Title(_) | Self::MalformedTitle | Self::Participant(_)
        )
    }
}

/// A message line split around its arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Message<'a> {
    /// Trimmed text before the arrow (may be empty).
    pub sender: &'a str,
    /// Trimmed text between the arrow and the colon, activation marker
    /// stripped (may be empty).
    pub receiver: &'a str,
    /// Trimmed message text after the colon, if a colon is present.
    pub text: Option<&'a str>,
}

/// Classify a single source line.
pub(crate) fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return Line::Blank;
    }
    if trimmed.starts_with(COMMENT_PREFIX) {
        return Line::Comment;
    }
    if trimmed == HEADER {
        return Line::Header;
    }
    if let Some(caps) = TITLE_PATTERN.captures(trimmed) {
        let text = caps.get(1).map_or("", |m| m.as_str().trim());
        return Line::Title(text);
    }
    if let Some(caps) = PARTICIPANT_PATTERN.captures(trimmed) {
        let rest = caps.get(1).map_or("", |m| m.as_str().trim());
        return Line::Participant(rest);
    }
    // A line with an arrow is a message even when it starts with `title`
    if let Some(arrow) = ARROW_PATTERN.find(trimmed) {
        return Line::Message(split_message(
            &trimmed[..arrow.start()],
            &trimmed[arrow.end()..],
        ));
    }
    if BARE_TITLE_PATTERN.is_match(trimmed) {
        return Line::MalformedTitle;
    }
    Line::Other
}

/// Byte range of the first message arrow in `line`.
pub(crate) fn find_arrow(line: &str) -> Option<Range<usize>> {
    ARROW_PATTERN.find(line).map(|arrow| arrow.range())
}

fn split_message<'a>(before: &'a str, after: &'a str) -> Message<'a> {
    let (target, text) = match after.split_once(':') {
        Some((target, text)) => (target, Some(text.trim())),
        None => (after, None),
    };
    let receiver = target
        .trim()
        .trim_start_matches(['+', '-'])
        .trim_start();

    Message {
        sender: before.trim(),
        receiver,
        text,
    }
}

/// A participant declaration split around the `as` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Declaration<'a> {
    /// `participant Name`
    Bare(&'a str),
    /// `participant Display Name as Alias`; both sides trimmed, either may be
    /// empty.
    Aliased { display: &'a str, alias: &'a str },
}

impl<'a> Declaration<'a> {
    /// Split the text following the `participant` keyword.
    pub(crate) fn parse(rest: &'a str) -> Self {
        match ALIAS_PATTERN.find(rest) {
            Some(keyword) => Self::Aliased {
                display: rest[..keyword.start()].trim(),
                alias: rest[keyword.end()..].trim(),
            },
            None => Self::Bare(rest.trim()),
        }
    }

    /// The identifier other lines use to refer to this participant.
    pub(crate) fn short_name(&self) -> &'a str {
        match *self {
            Self::Bare(name) => name,
            Self::Aliased { alias, .. } => alias,
        }
    }
}

/// Why a string is not a bare identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IdentifierError {
    Empty,
    LeadingDigit,
    InvalidCharacter,
}

/// Check that `name` is a bare identifier: letters, digits and underscores,
/// not starting with a digit.
pub(crate) fn check_identifier(name: &str) -> Result<(), IdentifierError> {
    let Some(first) = name.chars().next() else {
        return Err(IdentifierError::Empty);
    };
    if first.is_numeric() {
        return Err(IdentifierError::LeadingDigit);
    }
    if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(IdentifierError::InvalidCharacter);
    }
    Ok(())
}
