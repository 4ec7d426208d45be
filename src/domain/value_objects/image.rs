//! Container image value objects
//!
//! `ImageReference` is derived, never typed in by hand: see
//! [`ImageReference::derive`].

use serde::{Deserialize, Serialize};

use super::ServiceIdentity;

/// Default tag when the caller does not request one
pub const DEFAULT_TAG: &str = "latest";

/// Caller-requested build target (the "build context" of a Build/Deploy request)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildTarget {
    /// Registry/namespace prefix; defaults to the agent name
    #[serde(default)]
    pub repository: Option<String>,
    /// Image tag; defaults to `latest`
    #[serde(default)]
    pub tag: Option<String>,
}

impl BuildTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// Fully qualified image reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageReference {
    pub repository: String,
    pub name: String,
    pub tag: String,
}

impl ImageReference {
    /// Derive the image for a service.
    ///
    /// Pure in `{application, service, agent, target}`: the same inputs
    /// always give the same reference, so tags can be used as cache keys.
    pub fn derive(identity: &ServiceIdentity, target: &BuildTarget) -> Self {
        let repository = target
            .repository
            .as_deref()
            .map(|r| r.trim_end_matches('/'))
            .filter(|r| !r.is_empty())
            .unwrap_or(identity.agent())
            .to_string();
        let tag = target
            .tag
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TAG)
            .to_string();

        Self {
            repository,
            name: identity.dns_name(),
            tag,
        }
    }

    /// `repository/name:tag`
    pub fn full_name(&self) -> String {
        format!("{}/{}:{}", self.repository, self.name, self.tag)
    }
}

impl std::fmt::Display for ImageReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_name())
    }
}
