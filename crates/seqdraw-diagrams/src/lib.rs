//! Sequence-diagram validation and rendering for seqdraw.
//!
//! This crate turns sequence-diagram source text into rendered SVG:
//! - `SyntaxValidator` checks title, participant and message lines with
//!   line-accurate errors, caching results by content hash
//! - `analyze_complexity` computes participant/message counts against
//!   readability thresholds
//! - `CancellationRegistry` tracks one cooperative cancellation token per
//!   in-flight render, keyed by block id
//! - `DiagramProcessor` orchestrates a render: empty short-circuit, render
//!   cache, validation, delegated compile and error classification
//!
//! # Architecture
//!
//! The crate is organized into modules:
//! - [`validate`]: Title and participant validation (`SyntaxValidator`)
//! - [`complexity`]: Complexity metrics (`DiagramMetrics`)
//! - [`cancel`]: Cancellation tokens and registry
//! - [`processor`]: Render orchestration (`DiagramProcessor`)
//! - [`compiler`]: The `DiagramCompiler` seam
//! - [`kroki`]: `KrokiCompiler`, rendering through a Kroki server
//!
//! # Example
//!
//! ```ignore
//! use seqdraw_diagrams::{CancellationRegistry, DiagramProcessor, DiagramSource, KrokiCompiler, Theme};
//!
//! let processor = DiagramProcessor::new(KrokiCompiler::new("https://kroki.io"));
//! let registry = CancellationRegistry::new();
//!
//! let source = DiagramSource::new("Alice->>Bob: Hello", 0);
//! let token = registry.start(&source.block_id);
//! let result = processor.render(&source, Theme::Simple, Some(&token));
//! registry.complete(&source.block_id);
//! ```

mod cache;
mod cancel;
mod compiler;
mod complexity;
mod consts;
mod error;
mod kroki;
mod processor;
mod result;
mod source;
mod syntax;
mod theme;
mod validate;

pub use cache::RenderKey;
pub use cancel::{CancellationRegistry, CancellationToken, REASON_CANCEL_ALL, REASON_SUPERSEDED};
pub use compiler::{DiagramCompiler, RenderedDiagram};
pub use complexity::{DiagramMetrics, analyze_complexity};
pub use consts::{
    DEFAULT_RENDER_CACHE_ENTRIES, DEFAULT_TIMEOUT, DEFAULT_VALIDATION_CACHE_ENTRIES,
    DEFAULT_VALIDATION_CACHE_TTL, MAX_MESSAGES, MAX_PARTICIPANTS,
};
pub use error::{CompileError, RenderAborted, RenderError, RenderErrorKind};
pub use kroki::KrokiCompiler;
pub use processor::DiagramProcessor;
pub use result::{RenderResult, RenderStatus};
pub use source::DiagramSource;
pub use theme::{RenderMode, Theme};
pub use validate::{ParticipantValidation, SyntaxValidator, TitleValidation, ValidationResult};
