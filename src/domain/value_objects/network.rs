//! Network value objects
//!
//! - `NetworkMapping` - proposed port for a named endpoint
//! - `ProviderInformation` - connection data published by another service
//! - `EnvironmentVariable` - a single `KEY=value` pair

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Port proposed by the orchestrator for one endpoint.
///
/// Stored verbatim at Init and consumed by Deploy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkMapping {
    /// Endpoint name (e.g. `rest`)
    pub endpoint: String,
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

fn default_host() -> String {
    "localhost".to_string()
}

impl NetworkMapping {
    pub fn new(endpoint: impl Into<String>, port: u16) -> Self {
        Self {
            endpoint: endpoint.into(),
            host: default_host(),
            port,
        }
    }

    /// Parse `name=port`
    pub fn parse(spec: &str) -> Option<Self> {
        let (name, port) = spec.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let port = port.trim().parse().ok()?;
        Some(Self::new(name, port))
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Information published by a provider (database, queue, other service)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInformation {
    pub name: String,
    pub origin: String,
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

impl ProviderInformation {
    pub fn new(name: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            origin: origin.into(),
            data: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// One environment variable
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnvironmentVariable {
    pub key: String,
    pub value: String,
}

impl EnvironmentVariable {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl std::fmt::Display for EnvironmentVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}
