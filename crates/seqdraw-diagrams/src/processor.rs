//! Render orchestration.
//!
//! This module provides [`DiagramProcessor`], the single entry point that
//! turns a [`DiagramSource`] and a [`Theme`] into a [`RenderResult`].

use seqdraw_cache::{CacheStore, MemoryCache};

use crate::cache::RenderKey;
use crate::cancel::CancellationToken;
use crate::compiler::DiagramCompiler;
use crate::complexity::{DiagramMetrics, analyze_complexity};
use crate::consts::DEFAULT_RENDER_CACHE_ENTRIES;
use crate::error::{
    RenderAborted, RenderError, RenderErrorKind, SUGGEST_GENERIC, classify_compile_failure,
};
use crate::result::RenderResult;
use crate::source::DiagramSource;
use crate::theme::Theme;
use crate::validate::{SyntaxValidator, ValidationResult};

/// Message for a compile that finished without a drawable.
const NO_OUTPUT_MESSAGE: &str = "Diagram compiler produced no output";

/// Render orchestrator.
///
/// Sequences the empty short-circuit, render cache lookup, complexity
/// analysis, syntax validation and the delegated compile. Owns the
/// render-result cache; the validation cache lives in the
/// [`SyntaxValidator`].
///
/// # Configuration
///
/// Create the processor with a compiler, then configure using builder methods:
/// - [`with_render_cache`](Self::with_render_cache): Replace the render-result cache
/// - [`with_validator`](Self::with_validator): Replace the validator (and its cache)
///
/// # Cancellation
///
/// The token is checked before any work, again right before the compile, and
/// once more after the compiler returns. An aborted token makes
/// [`render`](Self::render) return [`RenderAborted`] and leaves no cache
/// entry behind.
///
/// # Example
///
/// ```ignore
/// use seqdraw_diagrams::{DiagramProcessor, DiagramSource, KrokiCompiler, Theme};
///
/// let processor = DiagramProcessor::new(KrokiCompiler::new("https://kroki.io"));
/// let source = DiagramSource::new("Alice->>Bob: Hello", 0);
///
/// let result = processor.render(&source, Theme::Simple, None)?;
/// ```
pub struct DiagramProcessor {
    /// External compiler producing drawables.
    compiler: Box<dyn DiagramCompiler>,
    /// Syntax validator with its own content-hash cache.
    validator: SyntaxValidator,
    /// Successful results keyed by `(block_id, theme)`.
    render_cache: Box<dyn CacheStore<RenderResult>>,
}

impl DiagramProcessor {
    /// Create a processor delegating to `compiler`.
    ///
    /// Uses the default validator and a 50-entry LRU render cache without TTL.
    #[must_use]
    pub fn new(compiler: impl DiagramCompiler + 'static) -> Self {
        Self {
            compiler: Box::new(compiler),
            validator: SyntaxValidator::new(),
            render_cache: Box::new(MemoryCache::new(DEFAULT_RENDER_CACHE_ENTRIES)),
        }
    }

    /// Set the render-result cache.
    ///
    /// Pass [`NullCache`](seqdraw_cache::NullCache) to disable render caching.
    #[must_use]
    pub fn with_render_cache(mut self, cache: Box<dyn CacheStore<RenderResult>>) -> Self {
        self.render_cache = cache;
        self
    }

    /// Set the syntax validator.
    #[must_use]
    pub fn with_validator(mut self, validator: SyntaxValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Render `source` with `theme`.
    ///
    /// Every non-abort outcome is a [`RenderResult`]: `empty` for blank
    /// source, `error` for invalid source or compiler failures, `success`
    /// otherwise. Only successes are cached.
    ///
    /// # Errors
    ///
    /// Returns [`RenderAborted`] if `token` is aborted at any checkpoint.
    /// Callers should treat it as "no result": show nothing, report nothing.
    pub fn render(
        &self,
        source: &DiagramSource,
        theme: Theme,
        token: Option<&CancellationToken>,
    ) -> Result<RenderResult, RenderAborted> {
        checkpoint(token)?;

        if source.is_blank() {
            return Ok(RenderResult::empty());
        }

        let key = RenderKey {
            block_id: &source.block_id,
            theme,
        }
        .cache_key();
        if let Some(cached) = self.render_cache.get(&key) {
            tracing::debug!(block_id = %source.block_id, theme = theme.as_str(), "render cache hit");
            return Ok(cached);
        }
        tracing::debug!(block_id = %source.block_id, theme = theme.as_str(), "render cache miss");

        let metrics = analyze_complexity(&source.content);

        let validation = self.validator.validate(&source.content);
        if let Some(error) = validation.first_error() {
            tracing::debug!(block_id = %source.block_id, error = %error, "diagram failed validation");
            return Ok(RenderResult::error(error.clone(), metrics));
        }

        checkpoint(token)?;
        let compiled = self
            .compiler
            .compile(&source.content, theme.render_mode());
        checkpoint(token)?;

        let result = match compiled {
            Ok(Some(diagram)) => RenderResult::success(diagram, metrics),
            Ok(None) => {
                tracing::warn!(block_id = %source.block_id, "diagram compiler produced no output");
                RenderResult::error(no_output_error(), metrics)
            }
            Err(e) => {
                tracing::warn!(block_id = %source.block_id, error = %e, "diagram compile failed");
                RenderResult::error(classify_compile_failure(e.message()), metrics)
            }
        };

        if result.is_success() {
            if metrics.exceeds_threshold {
                tracing::warn!(
                    block_id = %source.block_id,
                    participants = metrics.participant_count,
                    messages = metrics.message_count,
                    "diagram exceeds complexity threshold"
                );
            }
            self.render_cache.set(&key, result.clone());
        }

        Ok(result)
    }

    /// Complexity metrics for `source` without rendering it. Not cached.
    #[must_use]
    pub fn analyze_complexity(&self, source: &DiagramSource) -> DiagramMetrics {
        analyze_complexity(&source.content)
    }

    /// Validate `source` through the processor's (cached) validator.
    #[must_use]
    pub fn validate(&self, source: &DiagramSource) -> ValidationResult {
        self.validator.validate(&source.content)
    }

    /// Empty the render-result cache.
    ///
    /// Call whenever the effective theme changes.
    pub fn clear_cache(&self) {
        self.render_cache.clear();
    }

    #[must_use]
    pub fn render_cache_len(&self) -> usize {
        self.render_cache.len()
    }

    #[must_use]
    pub fn validation_cache_len(&self) -> usize {
        self.validator.cache_len()
    }

    #[must_use]
    pub fn validator(&self) -> &SyntaxValidator {
        &self.validator
    }
}

fn checkpoint(token: Option<&CancellationToken>) -> Result<(), RenderAborted> {
    token.map_or(Ok(()), CancellationToken::check)
}

fn no_output_error() -> RenderError {
    RenderError::new(RenderErrorKind::Render, NO_OUTPUT_MESSAGE).with_suggestion(SUGGEST_GENERIC)
}
