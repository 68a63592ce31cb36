//! `seqdraw analyze` command implementation.

use std::path::PathBuf;

use clap::Args;
use seqdraw_diagrams::{MAX_MESSAGES, MAX_PARTICIPANTS, analyze_complexity};

use super::read_source;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the analyze command.
#[derive(Args)]
pub(crate) struct AnalyzeArgs {
    /// Path to the diagram file.
    file: PathBuf,

    /// Print the metrics as JSON.
    #[arg(long)]
    json: bool,
}

impl AnalyzeArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let source = read_source(&self.file)?;
        let metrics = analyze_complexity(&source.content);

        if self.json {
            output.emit(&serde_json::to_string_pretty(&metrics)?)?;
            return Ok(());
        }

        output.info(&format!(
            "Participants: {} (threshold {MAX_PARTICIPANTS})",
            metrics.participant_count
        ));
        output.info(&format!(
            "Messages: {} (threshold {MAX_MESSAGES})",
            metrics.message_count
        ));
        if metrics.exceeds_threshold {
            output.warning("Diagram exceeds complexity thresholds and may render slowly.");
        } else {
            output.success("Diagram is within complexity thresholds.");
        }
        Ok(())
    }
}
