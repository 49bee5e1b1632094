// ── Order domain types ──

use std::num::NonZeroU32;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::money::Amount;

/// Fulfilment state of an order. Wire values are exact and case-sensitive.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Orders in this state still count towards revenue.
    pub fn is_billable(self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

/// A customer order as stored in the `orders` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub status: OrderStatus,
    pub amount: Amount,
    pub items: NonZeroU32,
    pub date: NaiveDate,
}
