//! Endpoints command handler

use std::path::Path;

use anyhow::Result;

use super::{load_service, GlobalOptions};

/// Print the endpoints resolved at load time
pub fn cmd_endpoints(dir: &Path, options: GlobalOptions) -> Result<()> {
    let service = load_service(dir, options)?;
    if options.json {
        println!("{}", serde_json::to_string(&service.loaded.endpoints)?);
    } else {
        print!("{}", options.renderer().endpoints(&service.loaded.endpoints));
    }
    Ok(())
}
