//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AgentError, AgentResult};

use super::types::AgentConfig;

/// Service-level config file, relative to the service root
pub const SERVICE_CONFIG: &str = ".dockyard.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(
                f,
                "unknown key '{}' in {}:{}",
                self.key,
                self.file.display(),
                line
            ),
            None => write!(f, "unknown key '{}' in {}", self.key, self.file.display()),
        }
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> AgentResult<(AgentConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: AgentConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| AgentError::Configuration {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(&content, &key),
                key,
                file: path.to_path_buf(),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from service config, user config, or defaults.
///
/// The first file that exists wins; a file that fails to parse is logged
/// and skipped.
pub fn load_or_default(service_root: Option<&Path>) -> AgentConfig {
    let candidates = service_root
        .map(|root| root.join(SERVICE_CONFIG))
        .into_iter()
        .chain(user_config_path());

    for path in candidates {
        if !path.exists() {
            continue;
        }
        match load_with_warnings(&path) {
            Ok((config, warnings)) => {
                for warning in &warnings {
                    tracing::warn!("{}", warning);
                }
                tracing::debug!(path = %path.display(), "configuration loaded");
                return with_env_overrides(config);
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring configuration file");
            }
        }
    }

    with_env_overrides(AgentConfig::default())
}

/// `~/.config/dockyard/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dockyard").join("config.toml"))
}

/// Apply environment variable overrides (DOCKYARD_* prefix)
pub fn with_env_overrides(config: AgentConfig) -> AgentConfig {
    apply_overrides(config, |key| std::env::var(key).ok())
}

pub(crate) fn apply_overrides(
    mut config: AgentConfig,
    var: impl Fn(&str) -> Option<String>,
) -> AgentConfig {
    // DOCKYARD_INSTALLER / DOCKYARD_OPENAPI_GENERATOR (whitespace-separated)
    if let Some(installer) = var("DOCKYARD_INSTALLER").and_then(split_command) {
        config.tools.installer = installer;
    }
    if let Some(generator) = var("DOCKYARD_OPENAPI_GENERATOR").and_then(split_command) {
        config.tools.openapi_generator = generator;
    }

    if let Some(docker) = var("DOCKYARD_DOCKER").filter(|v| !v.trim().is_empty()) {
        config.tools.docker = docker;
    }
    if let Some(kubectl) = var("DOCKYARD_KUBECTL").filter(|v| !v.trim().is_empty()) {
        config.tools.kubectl = kubectl;
    }

    // DOCKYARD_REPOSITORY (empty clears it)
    if let Some(repository) = var("DOCKYARD_REPOSITORY") {
        let repository = repository.trim().to_string();
        config.build.repository = (!repository.is_empty()).then_some(repository);
    }

    if let Some(namespace) = var("DOCKYARD_NAMESPACE").filter(|v| !v.trim().is_empty()) {
        config.deploy.namespace = namespace;
    }

    config
}

fn split_command(value: String) -> Option<Vec<String>> {
    let parts: Vec<String> = value.split_whitespace().map(str::to_string).collect();
    (!parts.is_empty()).then_some(parts)
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}
