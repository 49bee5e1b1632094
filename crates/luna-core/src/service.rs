// ── Data-access facade ──
//
// Three uniform read operations over the remote table backend. Every path
// that cannot produce remote rows (no backend, transport failure, schema
// drift) degrades to the fixed fallback dataset after a simulated latency.
// Nothing in here returns `Err` to the caller.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use luna_api::RestClient;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::BackendConfig;
use crate::error::CoreError;
use crate::model::{Customer, Order, Product, Record};

/// Latency emulated before serving fallback data.
pub const DEFAULT_FALLBACK_DELAY: Duration = Duration::from_millis(600);

// ── TableSource ──────────────────────────────────────────────────

/// Something that can return every row of a named table.
///
/// Implemented for [`RestClient`]; tests plug in their own sources.
pub trait TableSource: Send + Sync {
    fn fetch_table(
        &self,
        table: &'static str,
    ) -> impl Future<Output = Result<Vec<Value>, CoreError>> + Send;
}

impl TableSource for RestClient {
    fn fetch_table(
        &self,
        table: &'static str,
    ) -> impl Future<Output = Result<Vec<Value>, CoreError>> + Send {
        async move { self.select_all(table).await.map_err(CoreError::from) }
    }
}

// ── Outcome ──────────────────────────────────────────────────────

/// Why a fetch served fallback data instead of remote rows.
#[derive(Debug)]
pub enum FallbackReason {
    /// No backend client was constructed. Intentional demo mode.
    NotConfigured,
    /// The backend was unreachable or reported an error.
    RemoteError(CoreError),
    /// Remote rows came back but did not decode into records.
    SchemaMismatch(CoreError),
}

impl FallbackReason {
    /// The underlying error, if the fallback was not intentional.
    pub fn cause(&self) -> Option<&CoreError> {
        match self {
            Self::NotConfigured => None,
            Self::RemoteError(err) | Self::SchemaMismatch(err) => Some(err),
        }
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => f.write_str("no backend configured"),
            Self::RemoteError(err) => write!(f, "backend query failed: {err}"),
            Self::SchemaMismatch(err) => write!(f, "backend rows rejected: {err}"),
        }
    }
}

/// Rows plus the path that produced them.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    Remote(Vec<T>),
    Fallback { rows: Vec<T>, reason: FallbackReason },
}

impl<T> FetchOutcome<T> {
    pub fn rows(&self) -> &[T] {
        match self {
            Self::Remote(rows) | Self::Fallback { rows, .. } => rows,
        }
    }

    pub fn into_rows(self) -> Vec<T> {
        match self {
            Self::Remote(rows) | Self::Fallback { rows, .. } => rows,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            Self::Remote(_) => None,
            Self::Fallback { reason, .. } => Some(reason),
        }
    }

    /// Split into rows and the fallback reason (`None` for remote data).
    pub fn into_parts(self) -> (Vec<T>, Option<FallbackReason>) {
        match self {
            Self::Remote(rows) => (rows, None),
            Self::Fallback { rows, reason } => (rows, Some(reason)),
        }
    }
}

// ── DataService ──────────────────────────────────────────────────

/// The facade consumers fetch through.
///
/// Built once from a resolved configuration and shared by reference;
/// re-resolving configuration means building a new `DataService`.
#[derive(Debug, Clone)]
pub struct DataService<S = RestClient> {
    source: Option<S>,
    /// Why `connect` was handed a config but built no client.
    setup_error: Option<Arc<CoreError>>,
    fallback_delay: Duration,
}

impl DataService<RestClient> {
    /// Construct the remote client from `config`, if any.
    ///
    /// A config that cannot produce a client (bad URL, empty key) logs a
    /// warning and leaves the service unconfigured.
    pub fn connect(config: Option<&BackendConfig>) -> Self {
        match config.map(BackendConfig::build_client) {
            None => Self::with_source(None),
            Some(Ok(client)) => {
                debug!(endpoint = %client.base_url(), "backend client ready");
                Self::with_source(Some(client))
            }
            Some(Err(err)) => {
                warn!(error = %err, "could not build backend client, using fallback data");
                Self {
                    setup_error: Some(Arc::new(err)),
                    ..Self::with_source(None)
                }
            }
        }
    }

    /// A service that never talks to a backend.
    pub fn offline() -> Self {
        Self::with_source(None)
    }
}

impl<S: TableSource> DataService<S> {
    pub fn with_source(source: Option<S>) -> Self {
        Self {
            source,
            setup_error: None,
            fallback_delay: DEFAULT_FALLBACK_DELAY,
        }
    }

    pub fn with_fallback_delay(mut self, delay: Duration) -> Self {
        self.fallback_delay = delay;
        self
    }

    /// True iff a remote client was constructed.
    pub fn is_configured(&self) -> bool {
        self.source.is_some()
    }

    pub fn fallback_delay(&self) -> Duration {
        self.fallback_delay
    }

    /// The client construction failure behind an unconfigured service, if
    /// a backend config was supplied at all.
    pub fn setup_error(&self) -> Option<&CoreError> {
        self.setup_error.as_deref()
    }

    // ── Uniform operations ───────────────────────────────────────

    pub async fn fetch_orders(&self) -> Vec<Order> {
        self.fetch::<Order>().await.into_rows()
    }

    pub async fn fetch_customers(&self) -> Vec<Customer> {
        self.fetch::<Customer>().await.into_rows()
    }

    pub async fn fetch_products(&self) -> Vec<Product> {
        self.fetch::<Product>().await.into_rows()
    }

    pub async fn fetch_orders_outcome(&self) -> FetchOutcome<Order> {
        self.fetch().await
    }

    pub async fn fetch_customers_outcome(&self) -> FetchOutcome<Customer> {
        self.fetch().await
    }

    pub async fn fetch_products_outcome(&self) -> FetchOutcome<Product> {
        self.fetch().await
    }

    /// Fetch every row of `T::TABLE`, falling back to `T::fallback()`.
    pub async fn fetch<T: Record>(&self) -> FetchOutcome<T> {
        let reason = match &self.source {
            None => {
                debug!(table = T::TABLE, "no backend configured, serving fallback data");
                FallbackReason::NotConfigured
            }
            Some(source) => match source.fetch_table(T::TABLE).await {
                Ok(rows) => match decode_rows::<T>(rows) {
                    Ok(records) => {
                        debug!(table = T::TABLE, count = records.len(), "fetched remote rows");
                        return FetchOutcome::Remote(records);
                    }
                    Err(err) => {
                        warn!(table = T::TABLE, error = %err, "remote rows rejected, serving fallback data");
                        FallbackReason::SchemaMismatch(err)
                    }
                },
                Err(err) => {
                    warn!(table = T::TABLE, error = %err, "backend fetch failed, serving fallback data");
                    FallbackReason::RemoteError(err)
                }
            },
        };

        tokio::time::sleep(self.fallback_delay).await;
        FetchOutcome::Fallback {
            rows: T::fallback(),
            reason,
        }
    }

    /// Like [`fetch`](Self::fetch), but yields `None` once `cancel` fires.
    ///
    /// A consumer that goes away mid-fetch cancels its token and is
    /// guaranteed never to observe the result.
    pub async fn fetch_cancellable<T: Record>(
        &self,
        cancel: &CancellationToken,
    ) -> Option<FetchOutcome<T>> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!(table = T::TABLE, "fetch cancelled");
                None
            }
            outcome = self.fetch::<T>() => Some(outcome),
        }
    }
}

/// Decode raw rows, naming the first row that fails.
fn decode_rows<T: Record>(rows: Vec<Value>) -> Result<Vec<T>, CoreError> {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| {
            serde_json::from_value(row).map_err(|e| CoreError::Decode {
                table: T::TABLE.into(),
                index,
                message: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tokio::time::Instant;

    use super::*;
    use crate::fixtures;
    use crate::model::OrderStatus;

    /// Source that replays a canned result and counts calls.
    struct StubSource {
        result: fn(&'static str) -> Result<Vec<Value>, CoreError>,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn new(result: fn(&'static str) -> Result<Vec<Value>, CoreError>) -> Self {
            Self {
                result,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl TableSource for StubSource {
        fn fetch_table(
            &self,
            table: &'static str,
        ) -> impl Future<Output = Result<Vec<Value>, CoreError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let result = (self.result)(table);
            async move { result }
        }
    }

    fn unreachable_backend(_: &'static str) -> Result<Vec<Value>, CoreError> {
        Err(CoreError::ConnectionFailed {
            url: "https://x.test".into(),
            reason: "connection refused".into(),
        })
    }

    fn one_remote_order(_: &'static str) -> Result<Vec<Value>, CoreError> {
        Ok(vec![json!({
            "id": "#ORD-1", "customerName": "Remote Rita", "status": "Delivered",
            "amount": 42, "items": 1, "date": "2024-05-01"
        })])
    }

    fn drifted_schema(_: &'static str) -> Result<Vec<Value>, CoreError> {
        Ok(vec![json!({ "id": "#ORD-1", "customer": "Rita", "state": "done" })])
    }

    #[tokio::test(start_paused = true)]
    async fn unconfigured_serves_fallback_after_delay() {
        let service = DataService::offline();
        assert!(!service.is_configured());

        let start = Instant::now();
        let orders = service.fetch_orders().await;
        assert!(start.elapsed() >= DEFAULT_FALLBACK_DELAY);
        assert_eq!(orders, fixtures::orders());

        assert_eq!(service.fetch_customers().await, fixtures::customers());
        assert_eq!(service.fetch_products().await, fixtures::products());
    }

    #[test]
    fn unbuildable_client_records_setup_error() {
        let config = BackendConfig::new(
            "https://x.test",
            secrecy::SecretString::from("bad\nkey".to_owned()),
        );
        let service = DataService::connect(Some(&config));
        assert!(!service.is_configured());
        assert!(matches!(service.setup_error(), Some(CoreError::Config { .. })));

        assert!(DataService::connect(None).setup_error().is_none());
        assert!(DataService::offline().setup_error().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn unconfigured_reason_is_not_configured() {
        let outcome = DataService::offline().fetch_orders_outcome().await;
        assert!(matches!(
            outcome.fallback_reason(),
            Some(FallbackReason::NotConfigured)
        ));
        assert!(outcome.fallback_reason().and_then(FallbackReason::cause).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn remote_failure_is_masked_as_fallback() {
        let service = DataService::with_source(Some(StubSource::new(unreachable_backend)));
        assert!(service.is_configured());

        let outcome = service.fetch_orders_outcome().await;
        assert!(matches!(
            outcome.fallback_reason(),
            Some(FallbackReason::RemoteError(CoreError::ConnectionFailed { .. }))
        ));
        assert_eq!(outcome.into_rows(), fixtures::orders());
    }

    #[tokio::test(start_paused = true)]
    async fn remote_rows_are_returned_without_delay() {
        let service = DataService::with_source(Some(StubSource::new(one_remote_order)));

        let start = Instant::now();
        let outcome = service.fetch_orders_outcome().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert!(outcome.is_remote());

        let orders = outcome.into_rows();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].customer_name, "Remote Rita");
        assert_eq!(orders[0].status, OrderStatus::Delivered);
    }

    #[tokio::test(start_paused = true)]
    async fn schema_drift_is_reported_distinctly() {
        let service = DataService::with_source(Some(StubSource::new(drifted_schema)));

        let outcome = service.fetch_orders_outcome().await;
        match outcome.fallback_reason() {
            Some(FallbackReason::SchemaMismatch(CoreError::Decode { table, index, .. })) => {
                assert_eq!(table, "orders");
                assert_eq!(*index, 0);
            }
            other => panic!("expected schema mismatch, got {other:?}"),
        }
        assert_eq!(outcome.rows().len(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn every_call_refetches() {
        let source = StubSource::new(one_remote_order);
        let service = DataService::with_source(Some(source));
        service.fetch_orders().await;
        service.fetch_orders().await;
        let calls = service
            .source
            .as_ref()
            .map(|s| s.calls.load(Ordering::SeqCst));
        assert_eq!(calls, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn custom_delay_is_honoured() {
        let service = DataService::offline().with_fallback_delay(Duration::from_secs(2));
        let start = Instant::now();
        service.fetch_products().await;
        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_fetch_yields_nothing() {
        let service = DataService::offline();
        let cancel = CancellationToken::new();

        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            canceller.cancel();
        });

        let result = service.fetch_cancellable::<Order>(&cancel).await;
        assert!(result.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn uncancelled_fetch_completes() {
        let service = DataService::offline();
        let cancel = CancellationToken::new();
        let result = service.fetch_cancellable::<Customer>(&cancel).await;
        assert_eq!(result.map(|o| o.rows().len()), Some(6));
    }

    #[test]
    fn connect_without_config_is_unconfigured() {
        assert!(!DataService::connect(None).is_configured());
    }

    #[test]
    fn connect_with_bad_endpoint_is_unconfigured() {
        let cfg = BackendConfig::new("not a url", secrecy::SecretString::from("k".to_owned()));
        assert!(!DataService::connect(Some(&cfg)).is_configured());
    }

    #[test]
    fn connect_with_valid_config_is_configured() {
        let cfg = BackendConfig::new(
            "https://x.test",
            secrecy::SecretString::from("key123".to_owned()),
        );
        assert!(DataService::connect(Some(&cfg)).is_configured());
    }
}
