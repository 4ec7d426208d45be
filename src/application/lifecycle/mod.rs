//! Lifecycle Module
//!
//! The per-service state machine driven by an external orchestrator.
//!
//! ## Structure
//!
//! - `phase` - Phases and allowed transitions (`Phase`, `Operation`)
//! - `requests` - Request/response pairs, one per phase
//! - `controller` - The state machine itself (`LifecycleController`)
//!
//! ## Usage
//!
//! ```ignore
//! use dockyard::application::lifecycle::{LifecycleController, LoadRequest};
//!
//! let mut controller = LifecycleController::new(fs, repo, runner, artifacts, applier);
//! let loaded = controller.load(LoadRequest::new(root, session.clone()))?;
//! controller.answer(&session, WATCH_QUESTION, true)?;
//! controller.create(CreateRequest { session })?;
//! ```

mod controller;
mod phase;
mod requests;

pub use controller::{
    LifecycleController, ToolCommands, DEFAULT_REPLICAS, SOURCE_DIR, WATCH_QUESTION,
};
pub use phase::{Operation, Phase};
pub use requests::{
    BuildRequest, BuildResponse, CreateRequest, CreateResponse, DeployRequest, DeployResponse,
    InitRequest, InitResponse, LoadRequest, LoadResponse, SyncRequest, SyncResponse,
    UpdateRequest, UpdateResponse,
};

#[cfg(test)]
mod tests;
