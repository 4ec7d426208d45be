//! Build and deploy command handlers
//!
//! Deploy always rebuilds first so the applied image matches the sources.

use std::path::Path;

use anyhow::{Context, Result};

use dockyard::application::{BuildRequest, DeployRequest, InitRequest};
use dockyard::domain::value_objects::{BuildTarget, NetworkMapping};
use dockyard::presentation::{load_providers, BuildArgs};

use super::{load_service, GlobalOptions, LoadedService};

/// Execute the build command
pub fn cmd_build(dir: &Path, args: &BuildArgs, options: GlobalOptions) -> Result<()> {
    let mut service = load_service(dir, options)?;
    let target = prepare(&mut service, args, Vec::new())?;
    let response = service.controller.build(BuildRequest { target })?;
    if !options.json {
        print!("{}", options.renderer().build(&response));
    }
    Ok(())
}

/// Execute the deploy command
pub fn cmd_deploy(
    dir: &Path,
    args: &BuildArgs,
    namespace: Option<String>,
    ports: Vec<NetworkMapping>,
    options: GlobalOptions,
) -> Result<()> {
    let mut service = load_service(dir, options)?;
    let target = prepare(&mut service, args, ports)?;
    let built = service.controller.build(BuildRequest {
        target: target.clone(),
    })?;
    if !options.json {
        print!("{}", options.renderer().build(&built));
    }

    let namespace = namespace.unwrap_or_else(|| service.config.deploy.namespace.clone());
    let response = service.controller.deploy(DeployRequest {
        target,
        namespace: namespace.clone(),
    })?;
    if !options.json {
        print!("{}", options.renderer().deploy(&response, &namespace));
    }
    Ok(())
}

/// Run Init with the provider files and resolve the image target
fn prepare(
    service: &mut LoadedService,
    args: &BuildArgs,
    ports: Vec<NetworkMapping>,
) -> Result<BuildTarget> {
    let mut provider_infos = Vec::new();
    for path in &args.providers {
        provider_infos.extend(
            load_providers(path)
                .with_context(|| format!("Failed to read providers from {}", path.display()))?,
        );
    }
    service.controller.init(InitRequest {
        provider_infos,
        proposed_network_mappings: ports,
    })?;

    Ok(target(
        args,
        service.config.build.repository.as_deref(),
        service.loaded.identity.version(),
    ))
}

/// Flag values win over config; the tag falls back to the service version
fn target(args: &BuildArgs, repository: Option<&str>, version: &str) -> BuildTarget {
    let mut target = BuildTarget::new().with_tag(args.tag.as_deref().unwrap_or(version));
    if let Some(repository) = args.repository.as_deref().or(repository) {
        target = target.with_repository(repository);
    }
    target
}
