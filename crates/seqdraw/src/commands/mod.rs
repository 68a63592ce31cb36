//! CLI command implementations.

pub(crate) mod analyze;
pub(crate) mod check;
pub(crate) mod render;

use std::path::Path;

use seqdraw_cache::{MemoryCache, NullCache};
use seqdraw_config::Config;
use seqdraw_diagrams::{
    DiagramCompiler, DiagramProcessor, DiagramSource, RenderError, SyntaxValidator, Theme,
};

use crate::error::CliError;
use crate::output::Output;

pub(crate) use analyze::AnalyzeArgs;
pub(crate) use check::CheckArgs;
pub(crate) use render::RenderArgs;

/// Read a diagram file as the block at position 0.
fn read_source(path: &Path) -> Result<DiagramSource, CliError> {
    let content = std::fs::read_to_string(path)?;
    Ok(DiagramSource::new(content, 0))
}

/// Clap value parser for `--theme`.
fn parse_theme(s: &str) -> Result<Theme, String> {
    Theme::parse(s).ok_or_else(|| format!("unknown theme '{s}' (expected simple or hand-drawn)"))
}

/// Validator with the configured cache, or no cache when caching is disabled.
fn build_validator(config: &Config) -> SyntaxValidator {
    if config.cache.enabled {
        SyntaxValidator::with_cache(Box::new(
            MemoryCache::new(config.cache.validation_max_entries)
                .with_ttl(config.cache.validation_ttl()),
        ))
    } else {
        SyntaxValidator::with_cache(Box::new(NullCache))
    }
}

/// Processor with the configured validator and render cache.
fn build_processor(config: &Config, compiler: impl DiagramCompiler + 'static) -> DiagramProcessor {
    let processor = DiagramProcessor::new(compiler).with_validator(build_validator(config));
    if config.cache.enabled {
        processor.with_render_cache(Box::new(MemoryCache::new(
            config.cache.render_max_entries,
        )))
    } else {
        processor.with_render_cache(Box::new(NullCache))
    }
}

/// Print a render error with its line number and suggestion.
fn print_render_error(output: &Output, error: &RenderError) {
    output.error(&format!("{} error: {error}", error.kind.as_str()));
    if let Some(suggestion) = &error.suggestion {
        output.hint(&format!("  hint: {suggestion}"));
    }
}
