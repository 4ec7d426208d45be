//! Artifact Builder
//!
//! Renders the build descriptor and hands it to the external image builder.

use std::path::{Path, PathBuf};

use crate::domain::ports::{FileSystem, ImageBuildOutput, ImageBuildRequest, ImageBuilder};
use crate::domain::services::templates::{builder_templates, DescriptorInput, DESCRIPTOR};
use crate::domain::value_objects::{
    BuildTarget, EnvironmentVariable, ImageReference, ServiceIdentity,
};
use crate::error::{AgentError, AgentResult};

/// Inputs of one build, assembled fresh per Build call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    pub image: ImageReference,
    pub runtime_packages: Vec<String>,
    pub environment: Vec<EnvironmentVariable>,
}

/// Builds container images for one service
pub struct ArtifactBuilder {
    image_builder: Box<dyn ImageBuilder>,
}

impl ArtifactBuilder {
    pub fn new(image_builder: Box<dyn ImageBuilder>) -> Self {
        Self { image_builder }
    }

    /// Deterministic image for `identity` and the requested target
    pub fn image_reference(identity: &ServiceIdentity, target: &BuildTarget) -> ImageReference {
        ImageReference::derive(identity, target)
    }

    /// Render the builder template set under `root`.
    ///
    /// Returns the written paths, relative to `root`.
    pub fn write_descriptor<FS: FileSystem>(
        &self,
        fs: &FS,
        root: &Path,
        context: &BuildContext,
        components: &[String],
    ) -> AgentResult<Vec<PathBuf>> {
        let input = DescriptorInput {
            components: components.to_vec(),
            runtime_packages: context.runtime_packages.clone(),
        };

        let mut written = Vec::new();
        for file in builder_templates(&input) {
            fs.write(&file.destination(root), file.content())?;
            written.push(file.path().to_path_buf());
        }
        Ok(written)
    }

    /// Replace the descriptor and build the image.
    ///
    /// The previous descriptor is deleted first so nothing from an older
    /// render can leak into this build. The tool runs once; a failure is
    /// `AgentError::ImageBuild`.
    pub fn build<FS: FileSystem>(
        &self,
        fs: &FS,
        root: &Path,
        context: &BuildContext,
        components: &[String],
    ) -> AgentResult<ImageBuildOutput> {
        fs.remove_if_exists(&root.join(DESCRIPTOR))?;
        self.write_descriptor(fs, root, context, components)?;

        let request = ImageBuildRequest {
            root: root.to_path_buf(),
            descriptor: PathBuf::from(DESCRIPTOR),
            image: context.image.clone(),
        };

        tracing::debug!(
            builder = self.image_builder.name(),
            image = %context.image,
            "building image"
        );
        self.image_builder
            .build(&request)
            .map_err(|message| AgentError::ImageBuild {
                image: context.image.full_name(),
                message,
            })
    }
}
