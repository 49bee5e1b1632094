mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use luna_config::{CredentialChain, Settings};
use luna_core::DataService;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let mut cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    let settings = luna_config::load_settings_or_default();
    cli.global.apply_settings(&settings);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli, settings).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli, settings: Settings) -> Result<(), CliError> {
    let chain = CredentialChain::from_environment();

    match cli.command {
        // Config commands never touch the backend
        Command::Config(args) => commands::config_cmd::handle(args, &chain, settings, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "luna", &mut std::io::stdout());
            Ok(())
        }

        // Everything else reads through the data facade
        cmd => {
            let service = build_service(&chain, &settings, &cli.global);

            tracing::debug!(command = ?cmd, configured = service.is_configured(), "dispatching command");
            commands::dispatch(cmd, &service, &cli.global).await
        }
    }
}

/// Resolve credentials once and build the facade for this invocation.
fn build_service(chain: &CredentialChain, settings: &Settings, global: &GlobalOpts) -> DataService {
    let service = if global.offline {
        DataService::offline()
    } else {
        let resolved = chain.resolve_lenient();
        let backend = resolved
            .backend_config(settings)
            .map(|cfg| cfg.with_timeout(global.timeout()));
        DataService::connect(backend.as_ref())
    };
    service.with_fallback_delay(global.fallback_delay())
}
