// Async client for the PostgREST surface of the hosted store.
//
// Base path: /rest/v1/
// Auth: `apikey` header plus `Authorization: Bearer <key>`

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;

const REST_PREFIX: &str = "/rest/v1";

// ── Error response shape from PostgREST ──────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the table backend.
///
/// Cheap to clone: the inner `reqwest::Client` is reference counted, so
/// concurrent fetches can each hold their own handle.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RestClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an endpoint and access key.
    ///
    /// Injects `apikey` and `Authorization: Bearer` as default headers,
    /// both marked sensitive so they never show up in debug output.
    pub fn from_api_key(
        endpoint: &str,
        api_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(endpoint)?;

        let key = api_key.expose_secret();
        if key.is_empty() {
            return Err(Error::InvalidKeyHeader("key is empty".into()));
        }

        let mut headers = HeaderMap::new();
        let mut key_value =
            HeaderValue::from_str(key).map_err(|e| Error::InvalidKeyHeader(e.to_string()))?;
        key_value.set_sensitive(true);
        headers.insert("apikey", key_value);

        let mut bearer = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|e| Error::InvalidKeyHeader(e.to_string()))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let http = transport.build_client_with_headers(headers)?;
        Ok(Self { http, base_url })
    }

    /// Build the base URL, always ending in `/rest/v1/`.
    ///
    /// Accepts both the project root (`https://abc.supabase.co`) and an
    /// endpoint that already carries the REST prefix.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw.trim())?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(Error::UnsupportedScheme {
                    scheme: other.to_owned(),
                });
            }
        }

        let path = url.path().trim_end_matches('/').to_owned();
        if path.ends_with(REST_PREFIX) {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}{REST_PREFIX}/"));
        }
        url.set_query(None);

        Ok(url)
    }

    /// The normalized `/rest/v1/` base this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// `select * from {table}`: every row, no pagination, no filters.
    ///
    /// Rows come back untyped; decoding into domain records is the
    /// caller's job so that schema drift can be told apart from transport
    /// failures.
    pub async fn select_all(&self, table: &str) -> Result<Vec<serde_json::Value>, Error> {
        self.select(table, "*").await
    }

    /// `select {columns} from {table}`, deserialized into `T`.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        columns: &str,
    ) -> Result<Vec<T>, Error> {
        let url = self.base_url.join(table)?;
        debug!(%url, columns, "GET table");

        let resp = self
            .http
            .get(url)
            .query(&[("select", columns)])
            .header("Accept", "application/json")
            .send()
            .await?;
        handle_response(resp).await
    }
}

// ── Response handling ────────────────────────────────────────────────

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    if status.is_success() {
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    } else {
        Err(parse_error(status, resp).await)
    }
}

async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Error::InvalidApiKey;
    }

    let raw = resp.text().await.unwrap_or_default();

    if let Ok(err) = serde_json::from_str::<ErrorResponse>(&raw) {
        let mut message = err.message.unwrap_or_else(|| status.to_string());
        if let Some(hint) = err.hint {
            message = format!("{message} (hint: {hint})");
        }
        Error::Remote {
            status: status.as_u16(),
            message,
            code: err.code,
        }
    } else {
        Error::Remote {
            status: status.as_u16(),
            message: if raw.is_empty() {
                status.to_string()
            } else {
                raw
            },
            code: None,
        }
    }
}
