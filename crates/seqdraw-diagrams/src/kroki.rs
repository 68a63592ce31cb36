//! Kroki-backed diagram compiler.
//!
//! Sends Mermaid sequence-diagram source to a Kroki server and returns the
//! SVG it renders. The theme's rendering mode is passed to Mermaid through a
//! front-matter `config.look` block.
//!
//! The source dialect differs from Mermaid in two places, so lines are
//! rewritten before sending:
//! - `participant Display Name as Alias` becomes `participant Alias as Display Name`
//! - arrows map `->` to `->>`, `-->` to `-->>`, `->>` to `-)` and `-->>` to `--)`

use std::borrow::Cow;
use std::time::Duration;

use ureq::Agent;

use crate::compiler::{DiagramCompiler, RenderedDiagram};
use crate::consts::DEFAULT_TIMEOUT;
use crate::error::CompileError;
use crate::syntax::{Declaration, Line, classify, find_arrow};
use crate::theme::RenderMode;

/// Diagram-type header Mermaid requires on the first content line.
const MERMAID_HEADER: &str = "sequenceDiagram";

/// Create HTTP agent with the specified timeout.
///
/// HTTP error statuses are returned as responses so their bodies (which carry
/// Mermaid's parse errors) can be reported.
fn create_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

/// [`DiagramCompiler`] that renders through a Kroki server.
///
/// # Example
///
/// ```ignore
/// use seqdraw_diagrams::{DiagramProcessor, KrokiCompiler};
///
/// let processor = DiagramProcessor::new(KrokiCompiler::new("https://kroki.io"));
/// ```
pub struct KrokiCompiler {
    /// Kroki server URL without trailing slash.
    kroki_url: String,
    /// HTTP agent for connection pooling (reused across compile calls).
    agent: Agent,
}

impl KrokiCompiler {
    /// Create a compiler for the given Kroki server URL.
    #[must_use]
    pub fn new(kroki_url: impl Into<String>) -> Self {
        let kroki_url: String = kroki_url.into();
        Self {
            kroki_url: kroki_url.trim_end_matches('/').to_owned(),
            agent: create_agent(DEFAULT_TIMEOUT),
        }
    }

    /// Set HTTP timeout for Kroki requests.
    ///
    /// Default is 30 seconds.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.agent = create_agent(timeout);
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/mermaid/svg", self.kroki_url)
    }
}

impl DiagramCompiler for KrokiCompiler {
    fn compile(
        &self,
        source: &str,
        mode: RenderMode,
    ) -> Result<Option<RenderedDiagram>, CompileError> {
        let document = prepare_mermaid_source(source, mode);

        let response = self
            .agent
            .post(&self.endpoint())
            .header("Content-Type", "text/plain")
            .send(document.as_bytes())
            .map_err(|e| CompileError::new(format!("HTTP error: {e}")))?;

        let status = response.status().as_u16();
        let mut body = response.into_body();

        if status >= 400 {
            let error_body = body
                .read_to_string()
                .unwrap_or_else(|_| String::from("(unable to read error body)"));
            return Err(CompileError::new(format!(
                "HTTP {status}: {}",
                error_body.trim()
            )));
        }

        let svg = body
            .read_to_string()
            .map_err(|e| CompileError::new(format!("I/O error: {e}")))?;
        let svg = svg.trim();
        if svg.is_empty() {
            return Ok(None);
        }
        Ok(Some(RenderedDiagram {
            svg: svg.to_owned(),
        }))
    }
}

/// Build the Mermaid document sent to Kroki.
///
/// Prepends the `look` front matter, adds the `sequenceDiagram` header
/// when the source does not start with it, and translates each line.
fn prepare_mermaid_source(source: &str, mode: RenderMode) -> String {
    let has_header = source
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .is_some_and(|line| line == MERMAID_HEADER);

    let mut out = format!("---\nconfig:\n  look: {}\n---\n", mode.as_str());
    if !has_header {
        out.push_str(MERMAID_HEADER);
        out.push('\n');
    }
    let body: Vec<_> = source.lines().map(to_mermaid_line).collect();
    out.push_str(&body.join("\n"));
    out
}

/// Translate one source line to Mermaid, keeping its indentation.
fn to_mermaid_line(line: &str) -> Cow<'_, str> {
    let indent = &line[..line.len() - line.trim_start().len()];
    match classify(line) {
        Line::Participant(rest) => match Declaration::parse(rest) {
            Declaration::Aliased { display, alias } => {
                Cow::Owned(format!("{indent}participant {alias} as {display}"))
            }
            Declaration::Bare(_) => Cow::Borrowed(line),
        },
        Line::Message(_) => match find_arrow(line) {
            Some(arrow) => Cow::Owned(format!(
                "{}{}{}",
                &line[..arrow.start],
                mermaid_arrow(&line[arrow.clone()]),
                &line[arrow.end..]
            )),
            None => Cow::Borrowed(line),
        },
        _ => Cow::Borrowed(line),
    }
}

fn mermaid_arrow(arrow: &str) -> &str {
    match arrow {
        "->" => "->>",
        "-->" => "-->>",
        "->>" => "-)",
        "-->>" => "--)",
        other => other,
    }
}
