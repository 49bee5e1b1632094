//! Order command handlers.

use tabled::Tabled;

use luna_core::{DataService, Filter, Order, OrderStatus, find_by_id};

use crate::cli::{GlobalOpts, OrdersArgs, OrdersCommand};
use crate::error::CliError;
use crate::output::{self, Tone};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(crate) struct OrderRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Items")]
    items: u32,
    #[tabled(rename = "Date")]
    date: String,
}

impl From<&Order> for OrderRow {
    fn from(o: &Order) -> Self {
        Self {
            id: o.id.clone(),
            customer: o.customer_name.clone(),
            status: o.status.to_string(),
            amount: o.amount.to_string(),
            items: o.items.get(),
            date: o.date.to_string(),
        }
    }
}

pub(crate) fn tone(status: OrderStatus) -> Tone {
    match status {
        OrderStatus::Pending => Tone::Warn,
        OrderStatus::Shipped => Tone::Busy,
        OrderStatus::Delivered => Tone::Good,
        OrderStatus::Cancelled => Tone::Bad,
    }
}

fn detail(o: &Order, color: bool) -> String {
    [
        format!("ID:       {}", o.id),
        format!("Customer: {}", o.customer_name),
        format!("Status:   {}", output::paint(o.status.into(), tone(o.status), color)),
        format!("Amount:   {}", o.amount),
        format!("Items:    {}", o.items),
        format!("Date:     {}", o.date),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    service: &DataService,
    args: OrdersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let (orders, reason) = service.fetch_orders_outcome().await.into_parts();
    util::report_fallback("orders", reason.as_ref(), service, global);

    match args.command {
        OrdersCommand::List { search, status } => {
            let filter = Filter { search, status };
            let matched: Vec<&Order> = filter.apply(&orders);
            let out = output::render_list(
                global.output(),
                &matched,
                |o| OrderRow::from(*o),
                |o| o.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        OrdersCommand::Get { id } => {
            let order = find_by_id(&orders, &id).ok_or_else(|| util::not_found("order", id))?;
            let color = output::should_color(global.color());
            let out = output::render_single(
                global.output(),
                order,
                |o| detail(o, color),
                |o| o.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
