//! Domain Entities
//!
//! - `DependencySet` - build inputs and their fingerprint
//! - `Endpoint` - normalized endpoint derived from an API description
//! - `ServiceConfiguration` / `Settings` - persisted service state
//! - `EnvironmentVariables` - variables gathered at Init
//! - `RenderedFile` - output of a template set

mod dependency;
mod endpoint;
mod environment;
mod rendered_file;
mod service;

pub use dependency::{requirements, Dependency, DependencySet};
pub use endpoint::{Endpoint, EndpointDeclaration, RestApi, RestRoute};
pub use environment::{provider_environment_variables, EnvironmentVariables, PROVIDER_PREFIX};
pub use rendered_file::RenderedFile;
pub use service::{ServiceConfiguration, Settings, SERVICE_FILE};
