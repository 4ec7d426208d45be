//! Deployment Applier Port
//!
//! Renders and applies deployment manifests for an already-built image.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::domain::value_objects::{ImageReference, NetworkMapping, ServiceIdentity};
use crate::error::AgentResult;

/// Everything an applier needs to roll out one service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub identity: ServiceIdentity,
    pub image: ImageReference,
    /// Rendered environment, applied as a config map
    pub config_map: BTreeMap<String, String>,
    pub replicas: u32,
    /// Container ports, from the Init network mappings
    pub ports: Vec<NetworkMapping>,
    pub namespace: String,
    /// Service root; appliers may write manifests under it
    pub root: PathBuf,
}

/// External deployment collaborator. Success or failure only.
pub trait DeploymentApplier {
    fn apply(&self, deployment: &Deployment) -> AgentResult<()>;

    fn name(&self) -> &str;
}
