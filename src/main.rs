//! Dockyard CLI - build and deploy lifecycle agent
//!
//! Usage: dockyard [--json] [-C DIR] <COMMAND>
//!
//! Commands:
//!   create     Scaffold, install dependencies and generate endpoints
//!   update     Re-render the build descriptor
//!   build      Build the container image
//!   deploy     Build the image and apply a deployment
//!   endpoints  Show the endpoints of the service
//!   info       Describe the agent

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dockyard::presentation::{Cli, Commands};

use commands::GlobalOptions;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = GlobalOptions {
        json: cli.json,
        verbose: cli.verbose,
    };
    let dir = cli.dir.as_path();

    match cli.command {
        Commands::Create { yes } => commands::create::cmd_create(dir, yes, options),
        Commands::Update => commands::update::cmd_update(dir, options),
        Commands::Build(args) => commands::build::cmd_build(dir, &args, options),
        Commands::Deploy {
            build,
            namespace,
            ports,
        } => commands::build::cmd_deploy(dir, &build, namespace, ports, options),
        Commands::Endpoints => commands::endpoints::cmd_endpoints(dir, options),
        Commands::Info => commands::info::cmd_info(dir, options),
    }
}

/// Logs go to stderr so stdout stays free for results and NDJSON events.
/// `RUST_LOG` overrides the level picked by `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(fmt::layer().without_time().with_writer(std::io::stderr))
        .init();
}
