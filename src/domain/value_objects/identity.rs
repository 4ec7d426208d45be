//! Identity value objects
//!
//! - `AgentInfo` - the agent binary itself
//! - `AgentInformation` - what the agent offers, for discovery
//! - `ServiceIdentity` - which service an instance is packaging

use serde::{Deserialize, Serialize};

/// Static description of this agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentInfo {
    pub name: String,
    pub version: String,
    pub publisher: String,
}

impl AgentInfo {
    /// The agent compiled into this binary
    pub fn current() -> Self {
        Self {
            name: "python-fastapi".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            publisher: "dockyard".to_string(),
        }
    }

    /// `publisher/name:version`
    pub fn reference(&self) -> String {
        format!("{}/{}:{}", self.publisher, self.name, self.version)
    }
}

/// Something the agent can do for a service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    /// Produces container images
    Builder,
    /// Runs the service
    Runtime,
    /// Restarts the service on source changes
    HotReload,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Builder => "builder",
            Capability::Runtime => "runtime",
            Capability::HotReload => "hot-reload",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discovery record of this agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentInformation {
    pub agent: AgentInfo,
    /// Runtimes that must be present where the service runs
    pub runtime_requirements: Vec<String>,
    pub capabilities: Vec<Capability>,
    pub languages: Vec<String>,
    pub protocols: Vec<String>,
    /// Markdown description of the agent
    pub readme: String,
}

impl AgentInformation {
    /// What a Python/FastAPI agent offers; `readme` is rendered by the caller
    pub fn python_fastapi(agent: AgentInfo, readme: impl Into<String>) -> Self {
        Self {
            agent,
            runtime_requirements: vec!["python".to_string()],
            capabilities: vec![Capability::Builder, Capability::Runtime, Capability::HotReload],
            languages: vec!["python".to_string()],
            protocols: vec!["http".to_string()],
            readme: readme.into(),
        }
    }
}

/// Immutable identity of one service instance.
///
/// Set once at Load. Everything deterministic about an instance (image
/// names, endpoint namespaces) is derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceIdentity {
    application: String,
    service: String,
    agent: String,
    version: String,
}

impl ServiceIdentity {
    pub fn new(
        application: impl Into<String>,
        service: impl Into<String>,
        agent: impl Into<String>,
    ) -> Self {
        Self {
            application: application.into(),
            service: service.into(),
            agent: agent.into(),
            version: "0.0.0".to_string(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn application(&self) -> &str {
        &self.application
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn agent(&self) -> &str {
        &self.agent
    }

    /// Service version from the service file (not part of image derivation)
    pub fn version(&self) -> &str {
        &self.version
    }

    /// `application/service`
    pub fn unique(&self) -> String {
        format!("{}/{}", self.application, self.service)
    }

    /// DNS-friendly `application-service`
    pub fn dns_name(&self) -> String {
        format!("{}-{}", self.application, self.service)
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect()
    }
}

impl std::fmt::Display for ServiceIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.unique())
    }
}
