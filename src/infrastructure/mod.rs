//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - File system implementation (Local)
//! - `repositories/` - `service.yaml` repository
//! - `events/` - Event sinks (JSON, log)
//! - `process`, `docker`, `kubectl` - External tools
//! - `prompt` - Terminal confirmations

pub mod docker;
pub mod events;
pub mod fs;
pub mod kubectl;
pub mod process;
pub mod prompt;
pub mod repositories;

// Re-export for convenience
pub use docker::DockerImageBuilder;
pub use events::{JsonEventSink, LogEventSink};
pub use fs::LocalFs;
pub use kubectl::KubectlApplier;
pub use process::ProcessRunner;
pub use prompt::DialoguerPrompter;
pub use repositories::YamlServiceRepository;
