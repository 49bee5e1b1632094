// ── Core error types ──
//
// Errors surfaced by luna-core. Consumers of the facade never receive these
// as `Err`: they travel inside `FallbackReason` so callers can tell a
// missing backend from a broken one. The `From<luna_api::Error>` impl
// translates transport-layer errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    // ── Remote errors (wrapped, not exposed raw) ─────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// Backend error code (e.g. "42P01" for a missing table).
        code: Option<String>,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Row {index} of table '{table}' does not match the record schema: {message}")]
    Decode {
        table: String,
        index: usize,
        message: String,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<luna_api::Error> for CoreError {
    fn from(err: luna_api::Error) -> Self {
        match err {
            luna_api::Error::InvalidApiKey => CoreError::AuthenticationFailed {
                message: "Invalid API key".into(),
            },
            luna_api::Error::InvalidKeyHeader(reason) => CoreError::Config {
                message: format!("API key cannot be used as a header: {reason}"),
            },
            luna_api::Error::Transport(ref e) => {
                let url = e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string);
                if e.is_timeout() {
                    CoreError::Timeout { url }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url,
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            luna_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            luna_api::Error::UnsupportedScheme { scheme } => CoreError::Config {
                message: format!("Unsupported endpoint scheme '{scheme}'"),
            },
            luna_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            luna_api::Error::Remote {
                message,
                code,
                status,
            } => CoreError::Api {
                message,
                code,
                status: Some(status),
            },
            luna_api::Error::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("Unexpected response body: {message}"),
                code: None,
                status: None,
            },
        }
    }
}
