//! Config subcommand handlers.

use std::fmt::Write;

use serde::Serialize;

use luna_config::{
    CredentialChain, CredentialSource, ENV_KEY, ENV_URL, ResolvedCredentials, Settings, mask_key,
};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, Tone};

use super::util;

// ── View ────────────────────────────────────────────────────────────

/// What `config show` prints. The key is always masked.
#[derive(Debug, Serialize)]
struct ConfigView {
    url: Option<String>,
    url_source: Option<CredentialSource>,
    key: Option<String>,
    key_source: Option<CredentialSource>,
    complete: bool,
    override_path: String,
    settings_path: String,
    settings: Settings,
}

impl ConfigView {
    fn new(resolved: &ResolvedCredentials, chain: &CredentialChain, settings: Settings) -> Self {
        Self {
            url: resolved.url().map(ToOwned::to_owned),
            url_source: resolved.url.as_ref().map(|r| r.source),
            key: resolved.key().map(mask_key),
            key_source: resolved.key.as_ref().map(|r| r.source),
            complete: resolved.is_complete(),
            override_path: chain.store().path().display().to_string(),
            settings_path: luna_config::config_path().display().to_string(),
            settings,
        }
    }
}

fn with_source(value: Option<&str>, source: Option<CredentialSource>) -> String {
    match (value, source) {
        (Some(v), Some(s)) => format!("{v}  ({s})"),
        _ => "-".into(),
    }
}

fn detail(v: &ConfigView, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "URL:       {}", with_source(v.url.as_deref(), v.url_source));
    let _ = writeln!(out, "Key:       {}", with_source(v.key.as_deref(), v.key_source));
    let state = if v.complete {
        output::paint("configured", Tone::Good, color)
    } else {
        output::paint("incomplete (sample data only)", Tone::Warn, color)
    };
    let _ = writeln!(out, "Backend:   {state}");
    let _ = writeln!(out, "Override:  {}", v.override_path);
    let _ = writeln!(out, "Settings:  {}", v.settings_path);
    let _ = writeln!(out);
    let _ = writeln!(out, "[settings]");
    let _ = writeln!(out, "output = \"{}\"", v.settings.output);
    let _ = writeln!(out, "color = \"{}\"", v.settings.color);
    let _ = writeln!(out, "timeout = {}", v.settings.timeout);
    let _ = write!(out, "fallback_delay_ms = {}", v.settings.fallback_delay_ms);
    if let Some(ref ca) = v.settings.ca_cert {
        let _ = write!(out, "\nca_cert = \"{}\"", ca.display());
    }
    out
}

/// Warn when an environment variable shadows the value just saved.
fn note_shadowed(resolved: &ResolvedCredentials, global: &GlobalOpts) {
    if global.quiet {
        return;
    }
    let color = output::should_color(global.color());
    let shadowed = [
        (resolved.url.as_ref().map(|r| r.source), ENV_URL),
        (resolved.key.as_ref().map(|r| r.source), ENV_KEY),
    ];
    for (source, var) in shadowed {
        if source == Some(CredentialSource::Environment) {
            let tag = output::paint("note:", Tone::Warn, color);
            eprintln!("{tag} {var} is set and takes precedence over the saved value");
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(
    args: ConfigArgs,
    chain: &CredentialChain,
    settings: Settings,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let resolved = chain.resolve()?;
            let view = ConfigView::new(&resolved, chain, settings);
            let color = output::should_color(global.color());
            let out = output::render_single(
                global.output(),
                &view,
                |v| detail(v, color),
                |v| v.url.clone().unwrap_or_default(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set ─────────────────────────────────────────────────────
        ConfigCommand::Set { url, key } => {
            let key = match key {
                Some(k) => k,
                None => rpassword::prompt_password("Access key: ").map_err(util::prompt_err)?,
            };
            let resolved = chain.save_override(&url, &key)?;
            if !global.quiet {
                eprintln!("Saved connection override to {}", chain.store().path().display());
            }
            note_shadowed(&resolved, global);
            Ok(())
        }

        // ── Clear ───────────────────────────────────────────────────
        ConfigCommand::Clear => {
            if !util::confirm("Remove the saved connection override?", "config clear", global.yes)? {
                if !global.quiet {
                    eprintln!("Aborted");
                }
                return Ok(());
            }
            let resolved = chain.clear_override()?;
            if !global.quiet {
                eprintln!(
                    "Cleared connection override; now using {}",
                    with_source(resolved.url(), resolved.url.as_ref().map(|r| r.source))
                );
            }
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            let out = format!(
                "{}\n{}",
                chain.store().path().display(),
                luna_config::config_path().display()
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
