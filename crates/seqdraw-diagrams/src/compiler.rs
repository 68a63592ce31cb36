//! The diagram compiler seam.
//!
//! Turning validated source into a drawable is delegated to an external
//! compiler. [`DiagramProcessor`](crate::DiagramProcessor) only depends on the
//! [`DiagramCompiler`] trait, so the backend is replaceable (the bundled one
//! is [`KrokiCompiler`](crate::KrokiCompiler)).

use serde::Serialize;

use crate::error::CompileError;
use crate::theme::RenderMode;

/// A drawable produced by a compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDiagram {
    /// SVG markup.
    pub svg: String,
}

/// External diagram compiler.
pub trait DiagramCompiler: Send + Sync {
    /// Compile diagram source in the given rendering mode.
    ///
    /// Returns `Ok(None)` when the compiler ran but produced nothing drawable.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] with a human-readable message when the
    /// compiler rejects the source or cannot be reached.
    fn compile(
        &self,
        source: &str,
        mode: RenderMode,
    ) -> Result<Option<RenderedDiagram>, CompileError>;
}
