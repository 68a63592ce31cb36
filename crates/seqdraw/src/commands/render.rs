//! `seqdraw render` command implementation.

use std::path::PathBuf;

use clap::Args;
use seqdraw_config::{CliSettings, Config};
use seqdraw_diagrams::{CancellationRegistry, KrokiCompiler, RenderResult, RenderStatus, Theme};

use super::{build_processor, parse_theme, print_render_error, read_source};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Path to the diagram file.
    file: PathBuf,

    /// Theme: simple or hand-drawn (overrides config).
    #[arg(short, long, value_parser = parse_theme)]
    theme: Option<Theme>,

    /// Write SVG to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Kroki server URL for diagram rendering (overrides config).
    #[arg(long, env = "SEQDRAW_KROKI_URL")]
    kroki_url: Option<String>,

    /// Disable caching.
    #[arg(long)]
    no_cache: bool,

    /// Path to configuration file (default: auto-discover seqdraw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, I/O or rendering fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            theme: self.theme,
            kroki_url: self.kroki_url.clone(),
            cache_enabled: self.no_cache.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let compiler = KrokiCompiler::new(config.require_kroki_url()?)
            .timeout(config.compiler.timeout());
        let processor = build_processor(&config, compiler);
        let registry = CancellationRegistry::new();

        let source = read_source(&self.file)?;
        let theme = config.render.theme;
        tracing::info!(
            file = %self.file.display(),
            block_id = %source.block_id,
            theme = theme.as_str(),
            "rendering diagram"
        );

        let token = registry.start(&source.block_id);
        let rendered = processor.render(&source, theme, Some(&token));
        registry.complete_token(&source.block_id, &token);

        let result = match rendered {
            Ok(result) => result,
            Err(aborted) => {
                // Aborted renders produce no output and no error
                tracing::debug!(reason = %aborted.reason, "render aborted");
                return Ok(());
            }
        };

        self.write_result(&output, &result)
    }

    fn write_result(&self, output: &Output, result: &RenderResult) -> Result<(), CliError> {
        match result.status {
            RenderStatus::Empty => {
                output.info("Diagram is empty, nothing to render.");
                Ok(())
            }
            RenderStatus::Error => {
                if let Some(error) = &result.error {
                    print_render_error(output, error);
                }
                Err(CliError::Render(format!(
                    "failed to render {}",
                    self.file.display()
                )))
            }
            RenderStatus::Success => {
                if let Some(diagram) = &result.diagram {
                    if let Some(path) = &self.output {
                        std::fs::write(path, &diagram.svg)?;
                        output.success(&format!("Rendered to {}", path.display()));
                    } else {
                        output.emit(&diagram.svg)?;
                    }
                }
                if let Some(warning) = result.performance_warning() {
                    output.warning(&warning);
                }
                Ok(())
            }
        }
    }
}
