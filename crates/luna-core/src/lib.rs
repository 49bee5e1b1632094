//! Data layer between `luna-api` and the Luna Store front-ends.
//!
//! - **[`DataService`]**: the facade. Three uniform fetch operations
//!   (orders, customers, products) that try the hosted backend first and
//!   degrade to a fixed fallback dataset when no backend is configured, the
//!   backend fails, or its rows do not decode. Callers that care about the
//!   path taken use the `*_outcome` variants, which return a
//!   [`FetchOutcome`] tagged with a [`FallbackReason`].
//!
//! - **Domain model** ([`model`]): `Order`, `Customer`, `Product` and their
//!   status enums, plus the [`Amount`] money type that accepts numeric and
//!   pre-formatted wire values alike.
//!
//! - **[`filter`]** and **[`stats`]**: client-side search/status filtering
//!   and the dashboard summary, both pure functions over fetched slices.

pub mod config;
pub mod error;
pub mod filter;
pub mod fixtures;
pub mod model;
pub mod service;
pub mod stats;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::BackendConfig;
pub use error::CoreError;
pub use filter::{Filter, HasStatus, Searchable, find_by_id};
pub use service::{DEFAULT_FALLBACK_DELAY, DataService, FallbackReason, FetchOutcome, TableSource};
pub use stats::DashboardSummary;

pub use model::{
    Amount, Customer, CustomerStatus, Order, OrderStatus, Product, Record, StockStatus,
    parse_currency,
};
