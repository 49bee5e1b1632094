use thiserror::Error;

/// Top-level error type for the `luna-api` crate.
///
/// Covers every failure mode of a table query: key rejection, transport,
/// remote-reported errors, and response bodies that are not the expected
/// JSON shape. `luna-core` maps these into its own error type.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Access key rejected by the backend (HTTP 401/403).
    #[error("Invalid API key")]
    InvalidApiKey,

    /// The key cannot be sent as an HTTP header value.
    #[error("Invalid API key header value: {0}")]
    InvalidKeyHeader(String),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Endpoint parsed, but is not something we can send requests to.
    #[error("Unsupported endpoint scheme '{scheme}' (expected http or https)")]
    UnsupportedScheme { scheme: String },

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Remote ──────────────────────────────────────────────────────
    /// Structured error reported by the backend.
    #[error("Backend error (HTTP {status}): {message}")]
    Remote {
        message: String,
        code: Option<String>,
        status: u16,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}
