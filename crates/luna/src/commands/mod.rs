//! Command dispatch: bridges CLI args -> data facade -> output formatting.

pub mod config_cmd;
pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod util;

use luna_core::DataService;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a data command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    service: &DataService,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Orders(args) => orders::handle(service, args, global).await,
        Command::Customers(args) => customers::handle(service, args, global).await,
        Command::Products(args) => products::handle(service, args, global).await,
        Command::Dashboard(args) => dashboard::handle(service, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
