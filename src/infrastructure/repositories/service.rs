//! YAML Service Repository
//!
//! Implements the ServiceRepository port on top of `service.yaml`.

use std::path::Path;

use crate::domain::entities::{ServiceConfiguration, SERVICE_FILE};
use crate::domain::ports::{FileSystem, ServiceRepository};
use crate::error::{AgentError, AgentResult};

/// `service.yaml` backed repository
pub struct YamlServiceRepository<FS: FileSystem> {
    fs: FS,
}

impl<FS: FileSystem> YamlServiceRepository<FS> {
    pub fn new(fs: FS) -> Self {
        Self { fs }
    }
}

impl<FS: FileSystem> ServiceRepository for YamlServiceRepository<FS> {
    fn load(&self, location: &Path) -> AgentResult<ServiceConfiguration> {
        let path = location.join(SERVICE_FILE);
        let content = self.fs.read(&path).map_err(|e| AgentError::Configuration {
            path: path.clone(),
            message: if e.is_not_found() {
                "service file not found".to_string()
            } else {
                e.to_string()
            },
        })?;

        let config: ServiceConfiguration =
            serde_yaml_ng::from_str(&content).map_err(|e| AgentError::Configuration {
                path: path.clone(),
                message: e.to_string(),
            })?;

        if config.name.trim().is_empty() || config.application.trim().is_empty() {
            return Err(AgentError::Configuration {
                path,
                message: "name and application must not be empty".to_string(),
            });
        }
        Ok(config)
    }

    fn save(&self, location: &Path, config: &ServiceConfiguration) -> AgentResult<()> {
        let content = serde_yaml_ng::to_string(config)?;
        self.fs.write(&location.join(SERVICE_FILE), &content)?;
        Ok(())
    }
}
