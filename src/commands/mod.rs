//! Command handlers
//!
//! Every handler except `info` loads the service first, then runs the
//! phases its subcommand needs on one controller instance.

pub mod build;
pub mod create;
pub mod endpoints;
pub mod info;
pub mod update;

use std::path::Path;

use anyhow::{Context, Result};

use dockyard::application::{LoadRequest, LoadResponse, SessionId};
use dockyard::config::AgentConfig;
use dockyard::presentation::{create_controller, ConcreteController, TextRenderer};

/// Options shared by all handlers
#[derive(Debug, Clone, Copy)]
pub struct GlobalOptions {
    pub json: bool,
    pub verbose: u8,
}

impl GlobalOptions {
    pub fn renderer(&self) -> TextRenderer {
        TextRenderer {
            verbose: self.verbose,
            ..TextRenderer::default()
        }
    }
}

/// A controller with the service at `dir` loaded
pub struct LoadedService {
    pub controller: ConcreteController,
    pub config: AgentConfig,
    pub session: SessionId,
    pub loaded: LoadResponse,
}

pub fn load_service(dir: &Path, options: GlobalOptions) -> Result<LoadedService> {
    let config = AgentConfig::load_or_default(Some(dir));
    let mut controller = create_controller(&config, options.json);
    let session = SessionId::generate();
    let loaded = controller
        .load(LoadRequest::new(dir, session.clone()))
        .with_context(|| format!("Failed to load service at {}", dir.display()))?;
    Ok(LoadedService {
        controller,
        config,
        session,
        loaded,
    })
}
