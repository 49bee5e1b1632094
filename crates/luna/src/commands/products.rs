//! Product command handlers.

use tabled::Tabled;

use luna_core::{DataService, Filter, Product, StockStatus, find_by_id};

use crate::cli::{GlobalOpts, ProductsArgs, ProductsCommand};
use crate::error::CliError;
use crate::output::{self, Tone};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "SKU")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Stock")]
    stock: u32,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Product> for ProductRow {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            category: p.category.clone(),
            price: p.price.clone(),
            stock: p.stock,
            status: p.status.to_string(),
        }
    }
}

fn detail(p: &Product, color: bool) -> String {
    let tone = match p.status {
        StockStatus::InStock => Tone::Good,
        StockStatus::LowStock => Tone::Warn,
        StockStatus::OutOfStock => Tone::Bad,
    };
    [
        format!("SKU:      {}", p.id),
        format!("Name:     {}", p.name),
        format!("Category: {}", p.category),
        format!("Price:    {}", p.price),
        format!("Stock:    {}", p.stock),
        format!("Status:   {}", output::paint(p.status.into(), tone, color)),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    service: &DataService,
    args: ProductsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let (products, reason) = service.fetch_products_outcome().await.into_parts();
    util::report_fallback("products", reason.as_ref(), service, global);

    match args.command {
        ProductsCommand::List { search, status } => {
            let filter = Filter { search, status };
            let matched: Vec<&Product> = filter.apply(&products);
            let out = output::render_list(
                global.output(),
                &matched,
                |p| ProductRow::from(*p),
                |p| p.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProductsCommand::Get { id } => {
            let product =
                find_by_id(&products, &id).ok_or_else(|| util::not_found("product", id))?;
            let color = output::should_color(global.color());
            let out = output::render_single(
                global.output(),
                product,
                |p| detail(p, color),
                |p| p.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
