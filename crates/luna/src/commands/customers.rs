//! Customer command handlers.

use tabled::Tabled;

use luna_core::{Customer, CustomerStatus, DataService, Filter, find_by_id};

use crate::cli::{CustomersArgs, CustomersCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, Tone};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CustomerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Orders")]
    orders: u32,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Customer> for CustomerRow {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            email: c.email.clone(),
            location: c.location.clone(),
            orders: c.orders,
            spent: c.spent.clone(),
            status: c.status.to_string(),
        }
    }
}

fn detail(c: &Customer, color: bool) -> String {
    let tone = match c.status {
        CustomerStatus::Active => Tone::Good,
        CustomerStatus::Inactive => Tone::Muted,
    };
    [
        format!("ID:       {}", c.id),
        format!("Name:     {}", c.name),
        format!("Email:    {}", c.email),
        format!("Location: {}", c.location),
        format!("Orders:   {}", c.orders),
        format!("Spent:    {}", c.spent),
        format!("Status:   {}", output::paint(c.status.into(), tone, color)),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    service: &DataService,
    args: CustomersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let (customers, reason) = service.fetch_customers_outcome().await.into_parts();
    util::report_fallback("customers", reason.as_ref(), service, global);

    match args.command {
        CustomersCommand::List { search, status } => {
            let filter = Filter { search, status };
            let matched: Vec<&Customer> = filter.apply(&customers);
            let out = output::render_list(
                global.output(),
                &matched,
                |c| CustomerRow::from(*c),
                |c| c.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CustomersCommand::Get { id } => {
            let customer =
                find_by_id(&customers, &id).ok_or_else(|| util::not_found("customer", id))?;
            let color = output::should_color(global.color());
            let out = output::render_single(
                global.output(),
                customer,
                |c| detail(c, color),
                |c| c.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
