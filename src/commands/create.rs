//! Create command handler

use std::path::Path;

use anyhow::Result;
use is_terminal::IsTerminal;

use dockyard::application::CreateRequest;
use dockyard::domain::ports::{DefaultPrompter, Prompter};
use dockyard::infrastructure::DialoguerPrompter;

use super::{load_service, GlobalOptions};

/// Execute the create command
pub fn cmd_create(dir: &Path, yes: bool, options: GlobalOptions) -> Result<()> {
    let mut service = load_service(dir, options)?;

    let interactive = !yes && !options.json && std::io::stdin().is_terminal();
    let prompter: &dyn Prompter = if interactive {
        &DialoguerPrompter
    } else {
        &DefaultPrompter
    };
    service
        .controller
        .answer_with(&service.session, prompter)?;

    let response = service.controller.create(CreateRequest {
        session: service.session.clone(),
    })?;

    if !options.json {
        print!("{}", options.renderer().create(&response));
        if !service.loaded.getting_started.is_empty() {
            println!("\n{}", service.loaded.getting_started);
        }
    }
    Ok(())
}
