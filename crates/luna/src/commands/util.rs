//! Shared helpers for command handlers.

use std::io::IsTerminal;

use luna_core::{DataService, FallbackReason};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, Tone};

/// Tell the user (on stderr) that `table` rows are sample data.
///
/// An unconfigured service that was given credentials but could not build
/// its client names that failure instead of "no backend configured".
pub fn report_fallback(
    table: &str,
    reason: Option<&FallbackReason>,
    service: &DataService,
    global: &GlobalOpts,
) {
    let Some(reason) = reason else { return };
    if global.quiet {
        return;
    }
    let color = output::should_color(global.color());
    let tag = output::paint("note:", Tone::Warn, color);
    match (reason, service.setup_error()) {
        (FallbackReason::NotConfigured, Some(err)) => {
            eprintln!("{tag} showing sample {table} (backend client could not be built: {err})");
        }
        _ => eprintln!("{tag} showing sample {table} ({reason})"),
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Map a rpassword / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

pub fn not_found(resource_type: &str, identifier: String) -> CliError {
    CliError::NotFound {
        resource_type: resource_type.into(),
        identifier,
        list_command: format!("{resource_type}s list"),
    }
}
