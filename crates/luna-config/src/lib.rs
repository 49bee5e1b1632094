//! Shared configuration for Luna Store tools.
//!
//! Backend credential resolution (environment > persisted override >
//! built-in default, field by field), the persisted override store, and
//! general settings loaded through figment. Translation into
//! `luna_core::BackendConfig` happens here; core never reads files or env.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;
use tracing::{debug, warn};

use luna_core::BackendConfig;

/// Environment variable carrying the backend endpoint.
pub const ENV_URL: &str = "LUNA_SUPABASE_URL";
/// Environment variable carrying the backend access key.
pub const ENV_KEY: &str = "LUNA_SUPABASE_ANON_KEY";

/// Demo project shipped with the binary, used when nothing else is set.
pub const BUILTIN_URL: &str = "https://luna-demo.supabase.co";
pub const BUILTIN_KEY: &str = "luna-demo-anon-key";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config file paths ───────────────────────────────────────────────

/// Platform config directory (XDG on Linux).
pub fn config_dir() -> PathBuf {
    ProjectDirs::from("com", "luna-store", "luna").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("luna");
            p
        },
        |dirs| dirs.config_dir().to_path_buf(),
    )
}

/// General settings file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Persisted connection override file.
pub fn override_path() -> PathBuf {
    config_dir().join("connection.toml")
}

// ── Settings ────────────────────────────────────────────────────────

/// General, non-credential settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Simulated latency before fallback data is served, in milliseconds.
    #[serde(default = "default_fallback_delay_ms")]
    pub fallback_delay_ms: u64,

    /// Extra CA certificate for self-hosted backends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
            fallback_delay_ms: default_fallback_delay_ms(),
            ca_cert: None,
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_fallback_delay_ms() -> u64 {
    600
}

impl Settings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn fallback_delay(&self) -> Duration {
        Duration::from_millis(self.fallback_delay_ms)
    }
}

/// Load settings from the canonical path + `LUNA_*` environment.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(&config_path())
}

/// Load settings from `path` + `LUNA_*` environment. A missing file is fine.
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("LUNA_").only(&[
            "output",
            "color",
            "timeout",
            "fallback_delay_ms",
            "ca_cert",
        ]));

    Ok(figment.extract()?)
}

/// Load settings, returning defaults if the file cannot be read.
pub fn load_settings_or_default() -> Settings {
    load_settings().unwrap_or_else(|e| {
        warn!(error = %e, "ignoring unreadable settings file");
        Settings::default()
    })
}

// ── Credential tiers ────────────────────────────────────────────────

/// Where a resolved credential field came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum CredentialSource {
    #[strum(serialize = "environment")]
    Environment,
    #[strum(serialize = "saved override")]
    Override,
    #[strum(serialize = "built-in default")]
    BuiltIn,
}

/// One tier's view of the credential pair. Either field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PartialCredentials {
    #[serde(rename = "supabase_url", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(rename = "supabase_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl PartialCredentials {
    pub fn new(url: Option<String>, key: Option<String>) -> Self {
        Self {
            url: non_empty(url),
            key: non_empty(key),
        }
    }

    /// Read the tier through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::new(lookup(ENV_URL), lookup(ENV_KEY))
    }

    /// Read `LUNA_SUPABASE_URL` / `LUNA_SUPABASE_ANON_KEY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// The demo pair compiled into the binary.
    pub fn builtin() -> Self {
        Self::new(Some(BUILTIN_URL.into()), Some(BUILTIN_KEY.into()))
    }

    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.key.is_none()
    }
}

/// A resolved value tagged with its tier.
#[derive(Debug, Clone)]
pub struct Resolved<T> {
    pub value: T,
    pub source: CredentialSource,
}

/// Outcome of running the credential chain.
#[derive(Debug, Clone)]
pub struct ResolvedCredentials {
    pub url: Option<Resolved<String>>,
    pub key: Option<Resolved<SecretString>>,
}

impl ResolvedCredentials {
    /// Both fields resolved to non-empty values.
    pub fn is_complete(&self) -> bool {
        self.url.is_some() && self.key.is_some()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_ref().map(|r| r.value.as_str())
    }

    pub fn key(&self) -> Option<&SecretString> {
        self.key.as_ref().map(|r| &r.value)
    }

    /// Translate into a core `BackendConfig`; `None` unless complete.
    pub fn backend_config(&self, settings: &Settings) -> Option<BackendConfig> {
        let url = self.url()?;
        let key = self.key()?.clone();
        let mut cfg = BackendConfig::new(url, key).with_timeout(settings.timeout());
        cfg.ca_cert.clone_from(&settings.ca_cert);
        Some(cfg)
    }
}

/// Resolve url and key independently: first non-empty tier wins per field.
pub fn resolve_credentials(
    env: &PartialCredentials,
    persisted: &PartialCredentials,
    builtin: &PartialCredentials,
) -> ResolvedCredentials {
    let tiers = [
        (env, CredentialSource::Environment),
        (persisted, CredentialSource::Override),
        (builtin, CredentialSource::BuiltIn),
    ];

    let url = tiers.iter().find_map(|(tier, source)| {
        tier.url.clone().map(|value| Resolved {
            value,
            source: *source,
        })
    });
    let key = tiers.iter().find_map(|(tier, source)| {
        tier.key.clone().map(|value| Resolved {
            value: SecretString::from(value),
            source: *source,
        })
    });

    ResolvedCredentials { url, key }
}

// ── Override store ──────────────────────────────────────────────────

/// Durable storage for the user-supplied endpoint/key pair.
#[derive(Debug, Clone)]
pub struct OverrideStore {
    path: PathBuf,
}

impl OverrideStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform override path.
    pub fn default_location() -> Self {
        Self::new(override_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted pair. A missing file is an empty override.
    pub fn load(&self) -> Result<PartialCredentials, ConfigError> {
        let raw: PartialCredentials = Figment::from(Toml::file(&self.path)).extract()?;
        Ok(PartialCredentials::new(raw.url, raw.key))
    }

    /// Persist both values, replacing any previous override.
    pub fn save(&self, url: &str, key: &str) -> Result<(), ConfigError> {
        validate_override(url, key)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds = PartialCredentials::new(Some(url.trim().into()), Some(key.trim().into()));
        let toml_str = toml::to_string_pretty(&creds)?;
        std::fs::write(&self.path, toml_str)?;
        debug!(path = %self.path.display(), "saved connection override");
        Ok(())
    }

    /// Erase the persisted pair. Clearing an absent override is a no-op.
    pub fn clear(&self) -> Result<(), ConfigError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "cleared connection override");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn validate_override(url: &str, key: &str) -> Result<(), ConfigError> {
    if url.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "url".into(),
            reason: "endpoint cannot be empty".into(),
        });
    }
    if key.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "key".into(),
            reason: "access key cannot be empty".into(),
        });
    }

    let parsed: url::Url = url.trim().parse().map_err(|_| ConfigError::Validation {
        field: "url".into(),
        reason: format!("invalid URL: {url}"),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "url".into(),
            reason: format!("expected an http(s) URL, got scheme '{}'", parsed.scheme()),
        });
    }
    Ok(())
}

// ── Credential chain ────────────────────────────────────────────────

/// The three tiers, bundled. Every call re-reads the override store, so a
/// save or clear is reflected by the resolution it returns.
#[derive(Debug, Clone)]
pub struct CredentialChain {
    env: PartialCredentials,
    store: OverrideStore,
    builtin: PartialCredentials,
}

impl CredentialChain {
    pub fn new(env: PartialCredentials, store: OverrideStore, builtin: PartialCredentials) -> Self {
        Self {
            env,
            store,
            builtin,
        }
    }

    /// Process environment, platform override file, compiled-in demo pair.
    pub fn from_environment() -> Self {
        Self::new(
            PartialCredentials::from_env(),
            OverrideStore::default_location(),
            PartialCredentials::builtin(),
        )
    }

    pub fn store(&self) -> &OverrideStore {
        &self.store
    }

    pub fn resolve(&self) -> Result<ResolvedCredentials, ConfigError> {
        let persisted = self.store.load()?;
        Ok(resolve_credentials(&self.env, &persisted, &self.builtin))
    }

    /// Resolve for data access: an unreadable override is logged and
    /// treated as empty, so env and built-in tiers still apply.
    pub fn resolve_lenient(&self) -> ResolvedCredentials {
        let persisted = self.store.load().unwrap_or_else(|e| {
            warn!(
                path = %self.store.path().display(),
                error = %e,
                "ignoring unreadable connection override"
            );
            PartialCredentials::default()
        });
        resolve_credentials(&self.env, &persisted, &self.builtin)
    }

    /// Persist an override, then re-resolve.
    pub fn save_override(&self, url: &str, key: &str) -> Result<ResolvedCredentials, ConfigError> {
        self.store.save(url, key)?;
        self.resolve()
    }

    /// Erase the override, then re-resolve.
    pub fn clear_override(&self) -> Result<ResolvedCredentials, ConfigError> {
        self.store.clear()?;
        self.resolve()
    }
}

/// Show enough of a key to recognise it without leaking it.
pub fn mask_key(key: &SecretString) -> String {
    let raw = key.expose_secret();
    let shown: String = raw.chars().take(6).collect();
    if raw.chars().count() <= 6 {
        "******".into()
    } else {
        format!("{shown}…")
    }
}
