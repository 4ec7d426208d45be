//! Controller Factory
//!
//! Creates the lifecycle controller with infrastructure dependencies wired
//! up. This is the dependency injection point for the application.

use std::path::Path;
use std::sync::Arc;

use serde_yaml_ng::Value;

use crate::application::{ArtifactBuilder, LifecycleController};
use crate::config::AgentConfig;
use crate::domain::ports::LifecycleEventSink;
use crate::domain::value_objects::ProviderInformation;
use crate::error::{AgentError, AgentResult};
use crate::infrastructure::{
    DockerImageBuilder, JsonEventSink, KubectlApplier, LocalFs, LogEventSink, ProcessRunner,
    YamlServiceRepository,
};

/// The controller with all production dependencies
pub type ConcreteController = LifecycleController<LocalFs, YamlServiceRepository<LocalFs>>;

/// Create a controller configured from `config`
///
/// With `json`, events go to stdout as NDJSON and tool stdout is
/// suppressed so the stream stays parseable.
pub fn create_controller(config: &AgentConfig, json: bool) -> ConcreteController {
    let runner = ProcessRunner::new().quiet(json);
    let artifacts = ArtifactBuilder::new(Box::new(DockerImageBuilder::new(
        &config.tools.docker,
        Box::new(runner),
    )));
    let applier = KubectlApplier::new(&config.tools.kubectl, LocalFs::new(), Box::new(runner));
    let events: Arc<dyn LifecycleEventSink> = if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(LogEventSink)
    };

    LifecycleController::new(
        LocalFs::new(),
        YamlServiceRepository::new(LocalFs::new()),
        Box::new(runner),
        artifacts,
        Box::new(applier),
    )
    .with_tools(config.tool_commands())
    .with_runtime_packages(config.build.runtime_packages.clone())
    .with_events(events)
}

/// Read provider information from a YAML file.
///
/// The file holds either one provider mapping or a list of them.
pub fn load_providers(path: &Path) -> AgentResult<Vec<ProviderInformation>> {
    let invalid = |message: String| AgentError::Configuration {
        path: path.to_path_buf(),
        message,
    };

    let content = std::fs::read_to_string(path)?;
    let value: serde_yaml_ng::Value =
        serde_yaml_ng::from_str(&content).map_err(|e| invalid(e.to_string()))?;
    let items = match value {
        Value::Mapping(_) => vec![value],
        Value::Sequence(items) if items.iter().all(Value::is_mapping) => items,
        _ => {
            return Err(invalid(
                "expected a provider mapping or a list of them".to_string(),
            ))
        }
    };

    items
        .into_iter()
        .map(|item| serde_yaml_ng::from_value(item).map_err(|e| invalid(e.to_string())))
        .collect()
}
