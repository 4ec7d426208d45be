//! Service entities
//!
//! - `Settings` - per-instance agent settings
//! - `ServiceConfiguration` - the persisted `service.yaml`

use serde::{Deserialize, Serialize};

use super::EndpointDeclaration;
use crate::domain::value_objects::ServiceIdentity;

/// File name of the persisted service configuration
pub const SERVICE_FILE: &str = "service.yaml";

/// Agent settings for one service instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Developer only
    #[serde(default)]
    pub debug: bool,

    /// Restart the service when code changes
    #[serde(default)]
    pub watch: bool,

    /// Extra system packages installed in the runtime image
    #[serde(default, rename = "runtime-packages", skip_serializing_if = "Vec::is_empty")]
    pub runtime_packages: Vec<String>,
}

/// Contents of `service.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfiguration {
    pub name: String,
    pub application: String,
    #[serde(default = "default_version")]
    pub version: String,
    /// Agent that manages this service
    pub agent: String,
    #[serde(default)]
    pub endpoints: Vec<EndpointDeclaration>,
    #[serde(default)]
    pub spec: Settings,
}

fn default_version() -> String {
    "0.0.0".to_string()
}

impl ServiceConfiguration {
    pub fn new(
        application: impl Into<String>,
        name: impl Into<String>,
        agent: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            application: application.into(),
            version: default_version(),
            agent: agent.into(),
            endpoints: Vec::new(),
            spec: Settings::default(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: EndpointDeclaration) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    pub fn identity(&self) -> ServiceIdentity {
        ServiceIdentity::new(&self.application, &self.name, &self.agent)
            .with_version(&self.version)
    }
}
