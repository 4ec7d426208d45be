//! Image Builder Port
//!
//! Turns a build root plus a rendered descriptor into a container image.

use std::path::PathBuf;

use crate::domain::value_objects::ImageReference;

/// What to build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuildRequest {
    /// Build context root
    pub root: PathBuf,
    /// Descriptor path relative to `root`
    pub descriptor: PathBuf,
    /// Image to produce
    pub image: ImageReference,
}

impl ImageBuildRequest {
    pub fn descriptor_path(&self) -> PathBuf {
        self.root.join(&self.descriptor)
    }
}

/// Opaque result of a successful build; only logged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageBuildOutput {
    pub image_id: Option<String>,
}

/// External image construction tool.
///
/// A failure is reported as a message; the caller wraps it into
/// `AgentError::ImageBuild` and does not retry.
pub trait ImageBuilder {
    fn build(&self, request: &ImageBuildRequest) -> Result<ImageBuildOutput, String>;

    /// Human-readable tool name for logs
    fn name(&self) -> &str;
}

