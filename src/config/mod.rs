//! Configuration module for Dockyard
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (DOCKYARD_*)
//! 3. Service config (`<service>/.dockyard.toml`)
//! 4. User config (`~/.config/dockyard/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{user_config_path, with_env_overrides, ConfigWarning, SERVICE_CONFIG};
pub use types::{AgentConfig, BuildConfig, DeployConfig, ToolsConfig};
