// ── Dashboard statistics ──
//
// Headline numbers for the overview page, computed from whatever the
// facade returned (remote or fallback).

use std::collections::BTreeMap;

use serde::Serialize;
use strum::IntoEnumIterator;

use crate::model::{Amount, Customer, CustomerStatus, Order, OrderStatus, Product, parse_currency};

/// Aggregates shown on the dashboard overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub order_count: usize,
    /// Sum of all non-cancelled order amounts.
    pub revenue: Amount,
    /// Every status is present, zero counts included.
    pub orders_by_status: BTreeMap<OrderStatus, usize>,
    pub pending_orders: usize,
    pub customer_count: usize,
    pub active_customers: usize,
    pub product_count: usize,
    /// Products labelled "Low Stock" or "Out of Stock".
    pub low_stock_products: usize,
    pub units_in_stock: u64,
    /// Σ price × stock over products whose price parses.
    pub inventory_value: Amount,
    /// Newest orders first.
    pub recent_orders: Vec<Order>,
}

impl DashboardSummary {
    pub fn compute(
        orders: &[Order],
        customers: &[Customer],
        products: &[Product],
        recent: usize,
    ) -> Self {
        let mut orders_by_status: BTreeMap<OrderStatus, usize> =
            OrderStatus::iter().map(|s| (s, 0)).collect();
        for order in orders {
            *orders_by_status.entry(order.status).or_default() += 1;
        }

        let revenue = orders
            .iter()
            .filter(|o| o.status.is_billable())
            .map(|o| o.amount)
            .sum();

        let inventory_value = products
            .iter()
            .filter_map(|p| parse_currency(&p.price).map(|price| price.times(u64::from(p.stock))))
            .sum();

        // Stable sort: same-day orders keep their input order.
        let mut recent_orders = orders.to_vec();
        recent_orders.sort_by(|a, b| b.date.cmp(&a.date));
        recent_orders.truncate(recent);

        Self {
            order_count: orders.len(),
            revenue,
            pending_orders: orders_by_status
                .get(&OrderStatus::Pending)
                .copied()
                .unwrap_or_default(),
            orders_by_status,
            customer_count: customers.len(),
            active_customers: customers
                .iter()
                .filter(|c| c.status == CustomerStatus::Active)
                .count(),
            product_count: products.len(),
            low_stock_products: products.iter().filter(|p| p.status.needs_restock()).count(),
            units_in_stock: products.iter().map(|p| u64::from(p.stock)).sum(),
            inventory_value,
            recent_orders,
        }
    }
}
