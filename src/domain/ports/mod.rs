//! Domain Ports (Interfaces)
//!
//! Every external collaborator of the lifecycle sits behind one of these
//! traits. The infrastructure layer provides concrete implementations.

pub mod command_runner;
pub mod deployment_applier;
pub mod file_system;
pub mod image_builder;
pub mod lifecycle_events;
pub mod prompter;
pub mod service_repository;

pub use command_runner::{CommandError, CommandRunner, CommandSpec};
pub use deployment_applier::{Deployment, DeploymentApplier};
pub use file_system::{FileSystem, FsError, FsResult};
pub use image_builder::{ImageBuildOutput, ImageBuildRequest, ImageBuilder};
pub use lifecycle_events::{LifecycleEvent, LifecycleEventSink, NoopEventSink};
pub use prompter::{DefaultPrompter, Prompter, Question};
pub use service_repository::ServiceRepository;
