//! Update command handler

use std::path::Path;

use anyhow::Result;

use dockyard::application::UpdateRequest;

use super::{load_service, GlobalOptions};

/// Execute the update command
pub fn cmd_update(dir: &Path, options: GlobalOptions) -> Result<()> {
    let mut service = load_service(dir, options)?;
    let response = service.controller.update(UpdateRequest)?;
    if !options.json {
        print!("{}", options.renderer().update(&response));
    }
    Ok(())
}
