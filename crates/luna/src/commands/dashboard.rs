//! Dashboard command handler.

use std::fmt::Write;

use luna_core::{DashboardSummary, DataService, OrderStatus};

use crate::cli::{DashboardArgs, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, Tone};

use super::orders::{OrderRow, tone};
use super::util;

fn detail(s: &DashboardSummary, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Orders:        {}", s.order_count);
    let _ = writeln!(out, "Revenue:       {}", s.revenue);
    for (status, count) in &s.orders_by_status {
        let label = format!("{:<11}", status.to_string());
        let _ = writeln!(out, "  {} {count}", output::paint(&label, tone(*status), color));
    }
    let _ = writeln!(out, "Customers:     {} ({} active)", s.customer_count, s.active_customers);
    let _ = writeln!(out, "Products:      {}", s.product_count);
    let restock = format!("{} need restock", s.low_stock_products);
    let restock_tone = if s.low_stock_products == 0 { Tone::Good } else { Tone::Warn };
    let _ = writeln!(out, "  {}", output::paint(&restock, restock_tone, color));
    let _ = writeln!(out, "Units:         {}", s.units_in_stock);
    let _ = writeln!(out, "Inventory:     {}", s.inventory_value);

    if !s.recent_orders.is_empty() {
        let rows: Vec<OrderRow> = s.recent_orders.iter().map(OrderRow::from).collect();
        let _ = writeln!(out, "\nRecent orders");
        out.push_str(&output::render_table(&rows));
    }
    out.trim_end().to_owned()
}

fn plain(s: &DashboardSummary) -> String {
    let pending = s
        .orders_by_status
        .get(&OrderStatus::Pending)
        .copied()
        .unwrap_or_default();
    [
        format!("orders={}", s.order_count),
        format!("pending={pending}"),
        format!("revenue={}", s.revenue),
        format!("customers={}", s.customer_count),
        format!("active_customers={}", s.active_customers),
        format!("products={}", s.product_count),
        format!("low_stock={}", s.low_stock_products),
        format!("inventory_value={}", s.inventory_value),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    service: &DataService,
    args: DashboardArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let (orders, customers, products) = tokio::join!(
        service.fetch_orders_outcome(),
        service.fetch_customers_outcome(),
        service.fetch_products_outcome(),
    );
    util::report_fallback("orders", orders.fallback_reason(), service, global);
    util::report_fallback("customers", customers.fallback_reason(), service, global);
    util::report_fallback("products", products.fallback_reason(), service, global);

    let summary = DashboardSummary::compute(
        orders.rows(),
        customers.rows(),
        products.rows(),
        args.recent,
    );

    let color = output::should_color(global.color());
    let out = output::render_single(global.output(), &summary, |s| detail(s, color), plain)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
