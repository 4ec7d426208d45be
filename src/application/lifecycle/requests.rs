//! Lifecycle requests and responses
//!
//! One request/response pair per phase.

use std::path::PathBuf;

use crate::application::session::SessionId;
use crate::domain::entities::{Endpoint, Settings};
use crate::domain::ports::Question;
use crate::domain::value_objects::{
    BuildTarget, Fingerprint, ImageReference, NetworkMapping, ProviderInformation,
    ServiceIdentity,
};

#[derive(Debug, Clone)]
pub struct LoadRequest {
    /// Service root (directory holding `service.yaml`)
    pub location: PathBuf,
    /// Session the Create confirmations are registered under
    pub session: SessionId,
}

impl LoadRequest {
    pub fn new(location: impl Into<PathBuf>, session: SessionId) -> Self {
        Self {
            location: location.into(),
            session,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadResponse {
    pub identity: ServiceIdentity,
    pub endpoints: Vec<Endpoint>,
    pub getting_started: String,
    /// Questions the orchestrator must answer before Create
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Default)]
pub struct InitRequest {
    pub provider_infos: Vec<ProviderInformation>,
    pub proposed_network_mappings: Vec<NetworkMapping>,
}

#[derive(Debug, Clone)]
pub struct InitResponse {
    /// Number of environment variables after Init
    pub environment_count: usize,
}

#[derive(Debug, Clone)]
pub struct CreateRequest {
    pub session: SessionId,
}

#[derive(Debug, Clone)]
pub struct CreateResponse {
    pub settings: Settings,
    pub endpoints: Vec<Endpoint>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateRequest;

#[derive(Debug, Clone)]
pub struct UpdateResponse {
    /// Files rendered, relative to the service root
    pub written: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct BuildRequest {
    pub target: BuildTarget,
}

#[derive(Debug, Clone)]
pub struct BuildResponse {
    pub image: ImageReference,
    pub descriptor: PathBuf,
    /// Fingerprint of the build inputs at build time
    pub fingerprint: Fingerprint,
}

#[derive(Debug, Clone)]
pub struct DeployRequest {
    pub target: BuildTarget,
    pub namespace: String,
}

impl Default for DeployRequest {
    fn default() -> Self {
        Self {
            target: BuildTarget::default(),
            namespace: "default".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeployResponse {
    pub image: ImageReference,
    pub replicas: u32,
}

#[derive(Debug, Clone, Default)]
pub struct SyncRequest;

#[derive(Debug, Clone, Default)]
pub struct SyncResponse;
