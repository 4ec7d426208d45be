//! Info command handler

use std::path::Path;

use anyhow::Result;

use dockyard::config::AgentConfig;
use dockyard::presentation::create_controller;

use super::GlobalOptions;

/// Describe the agent. No service needs to exist at `dir`.
pub fn cmd_info(dir: &Path, options: GlobalOptions) -> Result<()> {
    let config = AgentConfig::load_or_default(Some(dir));
    let information = create_controller(&config, options.json).information();
    if options.json {
        println!("{}", serde_json::to_string(&information)?);
    } else {
        print!("{}", options.renderer().info(&information));
    }
    Ok(())
}
