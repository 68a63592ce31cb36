//! `seqdraw check` command implementation.

use std::path::PathBuf;

use clap::Args;
use seqdraw_config::Config;
use seqdraw_diagrams::ValidationResult;

use super::{build_validator, print_render_error, read_source};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to the diagram file.
    file: PathBuf,

    /// Print the validation result as JSON.
    #[arg(long)]
    json: bool,

    /// Path to configuration file (default: auto-discover seqdraw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the diagram is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;

        let source = read_source(&self.file)?;
        let result = build_validator(&config).validate(&source.content);

        if self.json {
            output.emit(&serde_json::to_string_pretty(&result)?)?;
        } else {
            print_validation(&output, &result);
        }

        if result.is_valid {
            Ok(())
        } else {
            Err(CliError::Invalid(format!(
                "{} is not a valid diagram",
                self.file.display()
            )))
        }
    }
}

fn print_validation(output: &Output, result: &ValidationResult) {
    if result.is_empty {
        output.info("Diagram is empty.");
        return;
    }

    if let Some(title) = &result.title
        && let Some(text) = &title.title
    {
        output.highlight(&format!("Title: {text}"));
    }

    let participants: Vec<_> = result.participants.iter().filter(|p| p.is_valid).collect();
    if !participants.is_empty() {
        output.info(&format!("Participants ({}):", participants.len()));
        for participant in participants {
            if participant.has_alias {
                output.info(&format!(
                    "  {} as {}",
                    participant.display_name, participant.short_name
                ));
            } else {
                output.info(&format!("  {}", participant.short_name));
            }
        }
    }

    if result.is_valid {
        output.success("Diagram is valid.");
        return;
    }

    output.warning(&format!("\n{} error(s):", result.errors.len()));
    for error in &result.errors {
        print_render_error(output, error);
    }
}
