//! Environment entity
//!
//! Environment variables accumulated during Init and rendered into the
//! deployment config map during Deploy.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::domain::value_objects::{EnvironmentVariable, ProviderInformation};
use crate::error::{AgentError, AgentResult};

/// Prefix of variables derived from provider information
pub const PROVIDER_PREFIX: &str = "PROVIDER";

/// Ordered environment variables of a service instance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentVariables {
    vars: Vec<EnvironmentVariable>,
}

impl EnvironmentVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one Init's worth of variables.
    ///
    /// A key set by an earlier call is replaced. Within one call identical
    /// pairs collapse, while conflicting values are kept so that
    /// `as_config_map` reports them.
    pub fn add(&mut self, vars: impl IntoIterator<Item = EnvironmentVariable>) {
        let mut batch: Vec<EnvironmentVariable> = Vec::new();
        for var in vars {
            if !batch.contains(&var) {
                batch.push(var);
            }
        }
        self.vars
            .retain(|existing| !batch.iter().any(|var| var.key == existing.key));
        self.vars.extend(batch);
    }

    pub fn get(&self) -> &[EnvironmentVariable] {
        &self.vars
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Render as config map data.
    ///
    /// Empty or duplicate keys are rejected rather than silently dropped.
    pub fn as_config_map(&self) -> AgentResult<BTreeMap<String, String>> {
        let mut data = BTreeMap::new();
        for var in &self.vars {
            if var.key.trim().is_empty() {
                return Err(config_map_error(format!(
                    "empty key for value '{}'",
                    var.value
                )));
            }
            if data.insert(var.key.clone(), var.value.clone()).is_some() {
                return Err(config_map_error(format!("duplicate key '{}'", var.key)));
            }
        }
        Ok(data)
    }
}

fn config_map_error(message: String) -> AgentError {
    AgentError::Configuration {
        path: PathBuf::from("environment"),
        message,
    }
}

/// Environment variables exposing one provider's data.
///
/// `origin=store/db, name=postgres, key=connection` becomes
/// `PROVIDER__STORE_DB__POSTGRES__CONNECTION`.
pub fn provider_environment_variables(
    info: &ProviderInformation,
) -> AgentResult<Vec<EnvironmentVariable>> {
    if info.name.trim().is_empty() {
        return Err(malformed_provider(info, "provider has no name"));
    }

    info.data
        .iter()
        .map(|(key, value)| {
            if key.trim().is_empty() {
                return Err(malformed_provider(info, "provider data has an empty key"));
            }
            let name = [
                PROVIDER_PREFIX.to_string(),
                env_segment(&info.origin),
                env_segment(&info.name),
                env_segment(key),
            ]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("__");
            Ok(EnvironmentVariable::new(name, value))
        })
        .collect()
}

fn env_segment(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

fn malformed_provider(info: &ProviderInformation, message: &str) -> AgentError {
    AgentError::Configuration {
        path: PathBuf::from(format!("provider:{}/{}", info.origin, info.name)),
        message: message.to_string(),
    }
}
