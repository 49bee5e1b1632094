// ── Domain model ──
//
// The three read-only record kinds served by the dashboard. Field names
// on the wire match the backend's column names exactly.

pub mod customer;
pub mod money;
pub mod order;
pub mod product;

use serde::de::DeserializeOwned;

pub use customer::{Customer, CustomerStatus};
pub use money::{Amount, parse_currency};
pub use order::{Order, OrderStatus};
pub use product::{Product, StockStatus};

use crate::fixtures;

/// A record kind that lives in one remote table and has a fallback dataset.
pub trait Record: DeserializeOwned + Send + 'static {
    /// Remote table holding this record kind.
    const TABLE: &'static str;

    /// Unique identifier (order number, customer id, SKU).
    fn id(&self) -> &str;

    /// The fixed dataset served when the backend is absent or failing.
    fn fallback() -> Vec<Self>;
}

impl Record for Order {
    const TABLE: &'static str = "orders";

    fn id(&self) -> &str {
        &self.id
    }

    fn fallback() -> Vec<Self> {
        fixtures::orders()
    }
}

impl Record for Customer {
    const TABLE: &'static str = "customers";

    fn id(&self) -> &str {
        &self.id
    }

    fn fallback() -> Vec<Self> {
        fixtures::customers()
    }
}

impl Record for Product {
    const TABLE: &'static str = "products";

    fn id(&self) -> &str {
        &self.id
    }

    fn fallback() -> Vec<Self> {
        fixtures::products()
    }
}
