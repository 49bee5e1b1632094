// ── Customer domain types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

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
pub enum CustomerStatus {
    Active,
    Inactive,
}

/// A customer record from the `customers` table.
///
/// `spent` arrives pre-formatted (e.g. `"$1,200.50"`) and is kept verbatim;
/// use [`parse_currency`](super::parse_currency) when arithmetic is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub location: String,
    pub orders: u32,
    pub spent: String,
    pub status: CustomerStatus,
}
