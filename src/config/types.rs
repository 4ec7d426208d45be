//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::application::ToolCommands;
use crate::error::AgentResult;

use super::loader::{self, ConfigWarning};

/// External tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Dependency installer, run in `src/`
    pub installer: Vec<String>,
    /// OpenAPI generator, run in `src/`
    pub openapi_generator: Vec<String>,
    /// Image builder binary
    pub docker: String,
    /// Deployment applier binary
    pub kubectl: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        let tools = ToolCommands::default();
        Self {
            installer: tools.installer,
            openapi_generator: tools.openapi_generator,
            docker: "docker".to_string(),
            kubectl: "kubectl".to_string(),
        }
    }
}

/// Image build defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Image repository (defaults to the agent name)
    pub repository: Option<String>,
    /// System packages added to every runtime image
    pub runtime_packages: Vec<String>,
}

/// Deployment defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    pub namespace: String,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            namespace: "default".to_string(),
        }
    }
}

/// Agent configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub tools: ToolsConfig,
    pub build: BuildConfig,
    pub deploy: DeployConfig,
}

impl AgentConfig {
    /// Load configuration from a TOML file, ignoring unknown keys
    pub fn load(path: &Path) -> AgentResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and return non-fatal warnings (e.g. unknown keys)
    pub fn load_with_warnings(path: &Path) -> AgentResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from service config, user config, or defaults
    pub fn load_or_default(service_root: Option<&Path>) -> Self {
        loader::load_or_default(service_root)
    }

    /// Command lines of the source-level tools
    pub fn tool_commands(&self) -> ToolCommands {
        ToolCommands {
            installer: self.tools.installer.clone(),
            openapi_generator: self.tools.openapi_generator.clone(),
        }
    }
}
