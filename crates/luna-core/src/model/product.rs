// ── Product domain types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Stock label attached to a product.
///
/// Descriptive only: it is maintained by whoever edits the catalogue and is
/// never derived from, or checked against, the numeric `stock` count.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum StockStatus {
    #[serde(rename = "In Stock")]
    #[strum(serialize = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    #[strum(serialize = "Low Stock")]
    LowStock,
    #[serde(rename = "Out of Stock")]
    #[strum(serialize = "Out of Stock")]
    OutOfStock,
}

impl StockStatus {
    pub fn needs_restock(self) -> bool {
        matches!(self, Self::LowStock | Self::OutOfStock)
    }
}

/// A catalogue entry from the `products` table. `id` doubles as the SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub stock: u32,
    pub status: StockStatus,
}
