//! Docker Image Builder
//!
//! `docker build -f <root>/<descriptor> -t <image> <root>`

use crate::domain::ports::{
    CommandRunner, CommandSpec, ImageBuildOutput, ImageBuildRequest, ImageBuilder,
};

/// Image builder backed by the docker CLI
pub struct DockerImageBuilder {
    program: String,
    runner: Box<dyn CommandRunner>,
}

impl DockerImageBuilder {
    pub fn new(program: impl Into<String>, runner: Box<dyn CommandRunner>) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }

    /// The command line run for `request`
    pub fn command(&self, request: &ImageBuildRequest) -> CommandSpec {
        CommandSpec::new(&self.program, &request.root)
            .arg("build")
            .arg("-f")
            .arg(request.descriptor_path().display().to_string())
            .arg("-t")
            .arg(request.image.full_name())
            .arg(request.root.display().to_string())
    }
}

impl ImageBuilder for DockerImageBuilder {
    fn build(&self, request: &ImageBuildRequest) -> Result<ImageBuildOutput, String> {
        self.runner
            .run(&self.command(request))
            .map_err(|e| e.to_string())?;
        Ok(ImageBuildOutput::default())
    }

    fn name(&self) -> &str {
        "docker"
    }
}
