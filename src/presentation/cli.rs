//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --verbose, --dir) are inherited by all subcommands
//! - Each invocation loads the service first, then runs the phases the
//!   subcommand needs

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::value_objects::NetworkMapping;

/// Dockyard - build and deploy lifecycle agent for Python services
#[derive(Parser, Debug)]
#[command(name = "dockyard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events for orchestrators and CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Service directory (holds service.yaml)
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Image selection and provider inputs shared by build and deploy
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildArgs {
    /// Image tag (defaults to the service version)
    #[arg(long)]
    pub tag: Option<String>,

    /// Image repository (defaults to config, then the agent name)
    #[arg(long)]
    pub repository: Option<String>,

    /// YAML file with provider information (repeatable)
    #[arg(long = "provider", value_name = "FILE")]
    pub providers: Vec<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold the service, install dependencies and generate endpoints
    Create {
        /// Accept default answers instead of prompting
        #[arg(short, long)]
        yes: bool,
    },

    /// Re-render the build descriptor
    Update,

    /// Build the container image
    Build(BuildArgs),

    /// Build the image and apply a deployment
    Deploy {
        #[command(flatten)]
        build: BuildArgs,

        /// Target namespace (defaults to config)
        #[arg(short, long)]
        namespace: Option<String>,

        /// Container port for an endpoint, as NAME=PORT (repeatable)
        #[arg(long = "port", value_name = "NAME=PORT", value_parser = parse_mapping)]
        ports: Vec<NetworkMapping>,
    },

    /// Show the endpoints derived from the OpenAPI document
    Endpoints,

    /// Describe the agent: requirements, capabilities and README
    Info,
}

fn parse_mapping(value: &str) -> Result<NetworkMapping, String> {
    NetworkMapping::parse(value).ok_or_else(|| format!("expected NAME=PORT, got '{}'", value))
}
