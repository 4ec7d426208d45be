//! Service Repository Port
//!
//! Loads and persists the service configuration (`service.yaml`).

use std::path::Path;

use crate::domain::entities::ServiceConfiguration;
use crate::error::AgentResult;

/// Repository for the persisted service configuration.
///
/// Missing or malformed files are `AgentError::Configuration`.
pub trait ServiceRepository {
    /// Load the configuration of the service rooted at `location`
    fn load(&self, location: &Path) -> AgentResult<ServiceConfiguration>;

    /// Persist `config` for the service rooted at `location`
    fn save(&self, location: &Path, config: &ServiceConfiguration) -> AgentResult<()>;
}
