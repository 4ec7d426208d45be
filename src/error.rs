//! Error types for Dockyard
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{CommandError, FsError};

/// Result type alias for lifecycle operations
pub type AgentResult<T> = Result<T, AgentError>;

/// Main error type for lifecycle operations
///
/// Phase wrappers (`Create`, `Update`, `Build`, `Deploy`) box the first
/// failing sub-step. Nothing is aggregated and nothing is retried.
#[derive(Error, Debug)]
pub enum AgentError {
    /// Service identity, settings or provider information is unusable
    #[error("configuration error in {path}: {message}")]
    Configuration { path: PathBuf, message: String },

    /// Interactive confirmation protocol was not followed
    #[error("session '{session}': {message}")]
    Session { session: String, message: String },

    /// API description is missing or malformed
    #[error("cannot resolve endpoint from {path}: {reason}")]
    EndpointResolution { path: PathBuf, reason: String },

    /// Create phase failed
    #[error("create failed: {0}")]
    Create(#[source] Box<AgentError>),

    /// Update phase failed
    #[error("update failed: {0}")]
    Update(#[source] Box<AgentError>),

    /// Build phase failed
    #[error("build failed: {0}")]
    Build(#[source] Box<AgentError>),

    /// Deploy phase failed
    #[error("deploy failed: {0}")]
    Deploy(#[source] Box<AgentError>),

    /// External image builder failed
    #[error("cannot build image {image}: {message}")]
    ImageBuild { image: String, message: String },

    /// External command (installer, generator, applier) failed
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Operation invoked out of lifecycle order
    #[error("{operation} is not allowed while the service is {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: &'static str,
    },

    /// File system error
    #[error(transparent)]
    Fs(#[from] FsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl AgentError {
    pub fn create(err: AgentError) -> Self {
        Self::Create(Box::new(err))
    }

    pub fn update(err: AgentError) -> Self {
        Self::Update(Box::new(err))
    }

    pub fn build(err: AgentError) -> Self {
        Self::Build(Box::new(err))
    }

    pub fn deploy(err: AgentError) -> Self {
        Self::Deploy(Box::new(err))
    }

    /// The innermost error, skipping phase wrappers
    pub fn root(&self) -> &AgentError {
        match self {
            Self::Create(inner) | Self::Update(inner) | Self::Build(inner) | Self::Deploy(inner) => {
                inner.root()
            }
            other => other,
        }
    }

    pub fn is_session(&self) -> bool {
        matches!(self.root(), Self::Session { .. })
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self.root(), Self::Configuration { .. })
    }
}
