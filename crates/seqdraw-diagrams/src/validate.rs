//! Syntax validation for sequence-diagram source.
//!
//! [`SyntaxValidator`] scans source line by line and produces one
//! [`ValidationResult`] with every problem it found. It never fails: each
//! malformed line becomes a structured [`RenderError`] with a line number and
//! a suggestion.
//!
//! Results are cached by content hash. Invalid results are cached too, since
//! re-validating known-bad input is as wasteful as re-validating good input.

use std::collections::BTreeMap;

use seqdraw_cache::{CacheStore, MemoryCache, content_hash};
use serde::Serialize;

use crate::consts::{DEFAULT_VALIDATION_CACHE_ENTRIES, DEFAULT_VALIDATION_CACHE_TTL};
use crate::error::RenderError;
use crate::syntax::{Declaration, IdentifierError, Line, Message, check_identifier, classify};

const SUGGEST_TITLE_COLON: &str = "Use 'title: Your Title'.";
const SUGGEST_PARTICIPANT_FORM: &str =
    "Use 'participant Name' or 'participant Display Name as Alias'.";
const SUGGEST_DISPLAY_NAME: &str =
    "Put a display name before 'as', e.g. 'participant Alice Cooper as AC'.";
const SUGGEST_ALIAS: &str = "Put a short alias after 'as', e.g. 'participant Alice Cooper as AC'.";
const SUGGEST_SINGLE_WORD_ALIAS: &str =
    "The alias after 'as' must be a single word, e.g. 'participant Alice Cooper as AC'.";
const SUGGEST_USE_ALIAS: &str =
    "Names with spaces need an alias, e.g. 'participant Alice Cooper as AC'.";
const SUGGEST_LEADING_DIGIT: &str = "Start the name with a letter or underscore.";
const SUGGEST_IDENTIFIER_CHARS: &str = "Use only letters, digits and underscores in names.";
const SUGGEST_MESSAGE_ENDS: &str =
    "Messages need a sender and a receiver, e.g. 'Alice->>Bob: Hello'.";

/// Outcome of validating a `title:` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleValidation {
    pub is_valid: bool,
    /// Trimmed title text (absent when malformed).
    pub title: Option<String>,
    /// 1-based source line.
    pub line_number: usize,
    pub error: Option<RenderError>,
}

/// Outcome of validating one `participant` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantValidation {
    pub is_valid: bool,
    /// Identifier used by messages (the alias when one is given).
    pub short_name: String,
    /// Name shown in the diagram.
    pub display_name: String,
    pub has_alias: bool,
    /// 0-based index among participant declarations, in source order.
    pub declaration_order: usize,
    /// 1-based source line.
    pub line_number: usize,
    pub error: Option<RenderError>,
}

/// Consolidated outcome of validating a whole source text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub is_empty: bool,
    pub title: Option<TitleValidation>,
    pub participants: Vec<ParticipantValidation>,
    /// Short name to display name, valid participants only. A redeclared
    /// short name keeps its last display name.
    pub participant_map: BTreeMap<String, String>,
    /// All errors in source order.
    pub errors: Vec<RenderError>,
}

impl ValidationResult {
    fn empty() -> Self {
        Self {
            is_valid: true,
            is_empty: true,
            ..Self::default()
        }
    }

    /// First error in source order.
    #[must_use]
    pub fn first_error(&self) -> Option<&RenderError> {
        self.errors.first()
    }
}

/// Line-oriented validator with a content-addressed result cache.
///
/// # Example
///
/// ```
/// use seqdraw_diagrams::SyntaxValidator;
///
/// let validator = SyntaxValidator::new();
/// let result = validator.validate("participant Alice Cooper as AC\nAC->Bob: Hi");
///
/// assert!(result.is_valid);
/// assert_eq!(result.participant_map["AC"], "Alice Cooper");
/// ```
pub struct SyntaxValidator {
    cache: Box<dyn CacheStore<ValidationResult>>,
}

impl Default for SyntaxValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxValidator {
    /// Create a validator with the default cache (1000 entries, 5 minute TTL).
    #[must_use]
    pub fn new() -> Self {
        Self::with_cache(Box::new(
            MemoryCache::new(DEFAULT_VALIDATION_CACHE_ENTRIES)
                .with_ttl(DEFAULT_VALIDATION_CACHE_TTL),
        ))
    }

    /// Create a validator backed by the given cache.
    #[must_use]
    pub fn with_cache(cache: Box<dyn CacheStore<ValidationResult>>) -> Self {
        Self { cache }
    }

    /// Validate diagram source.
    ///
    /// Identical content returns the cached result from an earlier call.
    pub fn validate(&self, source: &str) -> ValidationResult {
        let key = content_hash(source);
        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!(key = %key, "validation cache hit");
            return cached;
        }

        let result = validate_source(source);
        self.cache.set(&key, result.clone());
        result
    }

    /// Drop every cached validation result.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Remove expired cached results, returning how many were dropped.
    pub fn cleanup_cache(&self) -> usize {
        self.cache.cleanup()
    }

    /// Number of cached validation results.
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

/// Uncached validation pass.
fn validate_source(source: &str) -> ValidationResult {
    if source.trim().is_empty() {
        return ValidationResult::empty();
    }

    let mut result = ValidationResult::default();
    // Only the first title line is honored; an empty one still claims the slot.
    let mut title_seen = false;

    for (index, raw_line) in source.lines().enumerate() {
        let line_number = index + 1;

        match classify(raw_line) {
            Line::Title(text) if !title_seen => {
                title_seen = true;
                if !text.is_empty() {
                    result.title = Some(TitleValidation {
                        is_valid: true,
                        title: Some(text.to_owned()),
                        line_number,
                        error: None,
                    });
                }
            }
            Line::MalformedTitle if !title_seen => {
                title_seen = true;
                let error = RenderError::syntax("Title declaration is missing a colon", line_number)
                    .with_suggestion(SUGGEST_TITLE_COLON);
                result.errors.push(error.clone());
                result.title = Some(TitleValidation {
                    is_valid: false,
                    title: None,
                    line_number,
                    error: Some(error),
                });
            }
            Line::Participant(rest) => {
                let order = result.participants.len();
                let participant = validate_participant(rest, line_number, order);
                if let Some(error) = &participant.error {
                    result.errors.push(error.clone());
                } else {
                    result.participant_map.insert(
                        participant.short_name.clone(),
                        participant.display_name.clone(),
                    );
                }
                result.participants.push(participant);
            }
            Line::Message(message) => {
                if let Some(error) = validate_message(&message, line_number) {
                    result.errors.push(error);
                }
            }
            _ => {}
        }
    }

    result.is_valid =
        result.participants.iter().all(|p| p.is_valid) && result.errors.is_empty();
    result
}

fn validate_participant(rest: &str, line_number: usize, order: usize) -> ParticipantValidation {
    let declaration = Declaration::parse(rest);
    let (short_name, display_name, has_alias) = match declaration {
        Declaration::Bare(name) => (name, name, false),
        Declaration::Aliased { display, alias } => (alias, display, true),
    };

    let error = check_declaration(declaration)
        .err()
        .map(|(message, suggestion)| {
            RenderError::syntax(message, line_number).with_suggestion(suggestion)
        });

    ParticipantValidation {
        is_valid: error.is_none(),
        short_name: short_name.to_owned(),
        display_name: display_name.to_owned(),
        has_alias,
        declaration_order: order,
        line_number,
        error,
    }
}

fn check_declaration(declaration: Declaration<'_>) -> Result<(), (String, &'static str)> {
    match declaration {
        Declaration::Bare("") => Err((
            "Participant declaration is missing a name".to_owned(),
            SUGGEST_PARTICIPANT_FORM,
        )),
        Declaration::Bare(name) if name.contains(char::is_whitespace) => Err((
            format!("Participant name '{name}' contains spaces"),
            SUGGEST_USE_ALIAS,
        )),
        Declaration::Bare(name) => check_name(name, "Participant name"),
        Declaration::Aliased { display: "", .. } => Err((
            "Participant display name before 'as' is empty".to_owned(),
            SUGGEST_DISPLAY_NAME,
        )),
        Declaration::Aliased { alias: "", .. } => Err((
            "Participant alias after 'as' is empty".to_owned(),
            SUGGEST_ALIAS,
        )),
        Declaration::Aliased { alias, .. } if alias.contains(char::is_whitespace) => Err((
            format!("Invalid alias declaration: '{alias}' is not a single identifier"),
            SUGGEST_SINGLE_WORD_ALIAS,
        )),
        Declaration::Aliased { alias, .. } => check_name(alias, "Participant alias"),
    }
}

fn check_name(name: &str, what: &str) -> Result<(), (String, &'static str)> {
    check_identifier(name).map_err(|error| match error {
        IdentifierError::Empty => (format!("{what} is empty"), SUGGEST_PARTICIPANT_FORM),
        IdentifierError::LeadingDigit => (
            format!("{what} '{name}' cannot start with a digit"),
            SUGGEST_LEADING_DIGIT,
        ),
        IdentifierError::InvalidCharacter => (
            format!("{what} '{name}' contains invalid characters"),
            SUGGEST_IDENTIFIER_CHARS,
        ),
    })
}

fn validate_message(message: &Message<'_>, line_number: usize) -> Option<RenderError> {
    let problem = if message.sender.is_empty() {
        "Message is missing a sender"
    } else if message.receiver.is_empty() {
        "Message is missing a receiver"
    } else {
        return None;
    };
    Some(RenderError::syntax(problem, line_number).with_suggestion(SUGGEST_MESSAGE_ENDS))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::RenderErrorKind;

    #[test]
    fn test_valid_messages() {
        let result = SyntaxValidator::new().validate("Alice->Bob: Hello\nBob->Alice: Hi");

        assert!(result.is_valid);
        assert!(!result.is_empty);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_missing_sender() {
        let result = SyntaxValidator::new().validate("->Alice: Message");

        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        let error = &result.errors[0];
        assert_eq!(error.kind, RenderErrorKind::Syntax);
        assert_eq!(error.message, "Message is missing a sender");
        assert_eq!(error.line_number, Some(1));
        assert_eq!(error.suggestion.as_deref(), Some(SUGGEST_MESSAGE_ENDS));
    }

    #[test]
    fn test_missing_receiver() {
        let result = SyntaxValidator::new().validate("Alice->Bob: ok\nAlice->>: lost");

        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].message, "Message is missing a receiver");
        assert_eq!(result.errors[0].line_number, Some(2));
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let result = SyntaxValidator::new().validate("  \n\t\n   ");

        assert!(result.is_empty);
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_participant_with_alias() {
        let result = SyntaxValidator::new().validate("participant Alice Cooper as AC");

        assert!(result.is_valid);
        let participant = &result.participants[0];
        assert_eq!(participant.short_name, "AC");
        assert_eq!(participant.display_name, "Alice Cooper");
        assert!(participant.has_alias);
        assert_eq!(participant.declaration_order, 0);
        assert_eq!(
            result.participant_map,
            BTreeMap::from([("AC".to_owned(), "Alice Cooper".to_owned())])
        );
    }

    #[test]
    fn test_bare_participant_maps_to_itself() {
        let result = SyntaxValidator::new().validate("participant Alice");

        let participant = &result.participants[0];
        assert_eq!(participant.short_name, "Alice");
        assert_eq!(participant.display_name, "Alice");
        assert!(!participant.has_alias);
        assert_eq!(result.participant_map["Alice"], "Alice");
    }

    #[test]
    fn test_participant_leading_digit() {
        let result = SyntaxValidator::new().validate("participant 1bad");

        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(
            result.errors[0].message,
            "Participant name '1bad' cannot start with a digit"
        );
        assert_eq!(
            result.errors[0].suggestion.as_deref(),
            Some(SUGGEST_LEADING_DIGIT)
        );
        assert!(!result.participants[0].is_valid);
        assert!(result.participant_map.is_empty());
    }

    #[test]
    fn test_error_recorded_on_declaration_and_result() {
        let result = SyntaxValidator::new().validate("participant bad-name");

        assert_eq!(
            result.participants[0].error.as_ref(),
            result.errors.first()
        );
    }

    #[test]
    fn test_participant_invalid_characters() {
        let result = SyntaxValidator::new().validate("participant bad-name");

        assert_eq!(
            result.errors[0].message,
            "Participant name 'bad-name' contains invalid characters"
        );
    }

    #[test]
    fn test_participant_missing_name() {
        let result = SyntaxValidator::new().validate("participant");

        assert_eq!(
            result.errors[0].message,
            "Participant declaration is missing a name"
        );
    }

    #[test]
    fn test_participant_name_with_spaces() {
        let result = SyntaxValidator::new().validate("participant Alice Cooper");

        assert_eq!(
            result.errors[0].message,
            "Participant name 'Alice Cooper' contains spaces"
        );
        assert_eq!(result.errors[0].suggestion.as_deref(), Some(SUGGEST_USE_ALIAS));
    }

    #[test]
    fn test_alias_shape_errors() {
        let cases = [
            (
                "participant as AC",
                "Participant display name before 'as' is empty",
            ),
            (
                "participant Alice Cooper as",
                "Participant alias after 'as' is empty",
            ),
            (
                "participant Alice as A B",
                "Invalid alias declaration: 'A B' is not a single identifier",
            ),
            (
                "participant Alice as 9lives",
                "Participant alias '9lives' cannot start with a digit",
            ),
            (
                "participant Alice as a.b",
                "Participant alias 'a.b' contains invalid characters",
            ),
        ];

        for (source, expected) in cases {
            let result = SyntaxValidator::new().validate(source);
            assert!(!result.is_valid, "expected invalid: {source}");
            assert_eq!(result.errors.len(), 1, "one error for: {source}");
            assert_eq!(result.errors[0].message, expected, "source: {source}");
        }
    }

    #[test]
    fn test_declaration_order_and_redeclaration() {
        let source = "\
participant Alice
participant Bob
participant Alice Liddell as Alice
";
        let result = SyntaxValidator::new().validate(source);

        assert!(result.is_valid);
        let orders: Vec<_> = result
            .participants
            .iter()
            .map(|p| p.declaration_order)
            .collect();
        assert_eq!(orders, vec![0, 1, 2]);
        // Last declaration wins
        assert_eq!(result.participant_map.len(), 2);
        assert_eq!(result.participant_map["Alice"], "Alice Liddell");
    }

    #[test]
    fn test_declaration_order_counts_invalid_participants() {
        let result = SyntaxValidator::new().validate("participant 1bad\nparticipant Good");

        assert_eq!(result.participants[1].declaration_order, 1);
        assert_eq!(result.participant_map.len(), 1);
    }

    #[test]
    fn test_title() {
        let result = SyntaxValidator::new().validate("Title:  Checkout flow \nA->B: x");

        let title = result.title.unwrap();
        assert!(title.is_valid);
        assert_eq!(title.title.as_deref(), Some("Checkout flow"));
        assert_eq!(title.line_number, 1);
    }

    #[test]
    fn test_title_on_later_line() {
        let result = SyntaxValidator::new().validate("sequenceDiagram\ntitle: Late");

        assert_eq!(result.title.unwrap().line_number, 2);
    }

    #[test]
    fn test_only_first_title_honored() {
        let result = SyntaxValidator::new().validate("title: First\ntitle: Second\ntitle oops");

        assert!(result.is_valid);
        assert_eq!(result.title.unwrap().title.as_deref(), Some("First"));
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_empty_title_is_not_an_error() {
        let result = SyntaxValidator::new().validate("title:\nA->B: x");

        assert!(result.is_valid);
        assert!(result.title.is_none());
    }

    #[test]
    fn test_title_missing_colon() {
        let result = SyntaxValidator::new().validate("title Checkout\nA->B: x");

        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(
            result.errors[0].message,
            "Title declaration is missing a colon"
        );
        let title = result.title.unwrap();
        assert!(!title.is_valid);
        assert_eq!(title.error.as_ref(), result.errors.first());
    }

    #[test]
    fn test_multiple_errors_in_source_order() {
        let source = "participant 1bad\n->B: x\nparticipant ok\nA->: y";
        let result = SyntaxValidator::new().validate(source);

        let lines: Vec<_> = result.errors.iter().map(|e| e.line_number).collect();
        assert_eq!(lines, vec![Some(1), Some(2), Some(4)]);
    }

    #[test]
    fn test_never_panics_on_degenerate_input() {
        let inputs = [
            "",
            "!!!",
            ":::---->>>>",
            "participant participant",
            "as as as",
            "title: title: title:",
            "->",
            "\u{0}\u{7f}",
            "participant \u{1F600}",
        ];

        for input in inputs {
            let result = SyntaxValidator::new().validate(input);
            let consistent = result.participants.iter().all(|p| p.is_valid)
                && result.errors.is_empty();
            assert_eq!(result.is_valid, consistent, "input: {input:?}");
        }
    }

    #[test]
    fn test_cache_hit_matches_fresh_result() {
        let validator = SyntaxValidator::new();
        let source = "title: T\nparticipant 1bad\nAlice->Bob: hi";

        let first = validator.validate(source);
        let second = validator.validate(source);
        assert_eq!(first, second);
        assert_eq!(validator.cache_len(), 1);

        validator.clear_cache();
        assert_eq!(validator.cache_len(), 0);
        let third = validator.validate(source);
        assert_eq!(first, third);
    }

    #[test]
    fn test_invalid_results_are_cached() {
        let validator = SyntaxValidator::new();

        validator.validate("->Alice: Message");

        assert_eq!(validator.cache_len(), 1);
    }

    #[test]
    fn test_cleanup_cache_sweeps_expired_results() {
        let validator = SyntaxValidator::with_cache(Box::new(
            MemoryCache::new(10).with_ttl(std::time::Duration::from_millis(20)),
        ));
        validator.validate("Alice->Bob: one");
        validator.validate("Alice->Bob: two");
        assert_eq!(validator.cleanup_cache(), 0);

        std::thread::sleep(std::time::Duration::from_millis(40));
        validator.validate("Alice->Bob: three");

        assert_eq!(validator.cleanup_cache(), 2);
        assert_eq!(validator.cache_len(), 1);
    }

    #[test]
    fn test_message_after_title_keyword_is_checked() {
        let result = SyntaxValidator::new().validate("title: T\ntitle -> : hi");

        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].message, "Message is missing a receiver");
        assert_eq!(result.errors[0].line_number, Some(2));
    }

    #[test]
    fn test_participant_non_ascii_leading_digit() {
        let result = SyntaxValidator::new().validate("participant \u{661}abc");

        assert!(!result.is_valid);
        assert!(result.errors[0].message.contains("cannot start with a digit"));
    }

    #[test]
    fn test_null_cache_validator() {
        let validator = SyntaxValidator::with_cache(Box::new(seqdraw_cache::NullCache));

        let result = validator.validate("Alice->Bob: Hello");

        assert!(result.is_valid);
        assert_eq!(validator.cache_len(), 0);
    }
}
