//! Dockyard - build and deploy lifecycle agent
//!
//! Drives one Python/FastAPI service through its lifecycle: load the
//! persisted service, scaffold it once, keep its build descriptor current,
//! build a container image and apply a deployment.
//!
//! ## Layers
//!
//! - `domain` - entities, value objects, ports and pure services
//! - `application` - the lifecycle controller and artifact builder
//! - `infrastructure` - file system, processes, docker, kubectl, events
//! - `config` - agent configuration (`.dockyard.toml`, env overrides)
//! - `presentation` - CLI parsing, wiring and text output

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{LifecycleController, Operation, Phase, SessionId};
pub use config::AgentConfig;
pub use domain::ports::Question;
pub use error::{AgentError, AgentResult};
