//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod api_kind;
mod hash;
mod identity;
mod image;
mod network;

pub use api_kind::{ApiKind, Visibility};
pub use hash::Fingerprint;
pub use identity::{AgentInfo, AgentInformation, Capability, ServiceIdentity};
pub use image::{BuildTarget, ImageReference, DEFAULT_TAG};
pub use network::{EnvironmentVariable, NetworkMapping, ProviderInformation};
