// ── Runtime backend configuration ──
//
// Describes *how* to reach the hosted table backend. Carries the resolved
// endpoint and key plus connection tuning, but never touches disk or the
// environment: luna-config resolves the values and hands this in.

use std::path::PathBuf;
use std::time::Duration;

use luna_api::{RestClient, TlsMode, TransportConfig};
use secrecy::SecretString;

use crate::error::CoreError;

/// Configuration for one backend connection.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Project URL (e.g. `https://abc.supabase.co`).
    pub endpoint: String,
    /// Anon/service key sent as `apikey` and bearer token.
    pub api_key: SecretString,
    /// Request timeout.
    pub timeout: Duration,
    /// Extra CA certificate to trust (self-hosted backends).
    pub ca_cert: Option<PathBuf>,
}

impl BackendConfig {
    pub fn new(endpoint: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key,
            timeout: Duration::from_secs(30),
            ca_cert: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: self
                .ca_cert
                .clone()
                .map_or(TlsMode::System, TlsMode::CustomCa),
            timeout: self.timeout,
        }
    }

    /// Construct the remote client. Fails on an unusable endpoint or key.
    pub fn build_client(&self) -> Result<RestClient, CoreError> {
        RestClient::from_api_key(&self.endpoint, &self.api_key, &self.transport())
            .map_err(CoreError::from)
    }
}
