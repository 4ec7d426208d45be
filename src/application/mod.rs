//! Application Layer
//!
//! Orchestration of the lifecycle phases.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Components
//!
//! - `LifecycleController` - Load, Init, Create, Update, Build, Deploy, Sync
//! - `ArtifactBuilder` - Descriptor rendering and image construction
//! - `SessionStore` - Confirmations registered at Load, consumed at Create

pub mod artifact;
pub mod lifecycle;
pub mod session;

pub use artifact::{ArtifactBuilder, BuildContext};
pub use lifecycle::{
    BuildRequest, BuildResponse, CreateRequest, CreateResponse, DeployRequest, DeployResponse,
    InitRequest, InitResponse, LifecycleController, LoadRequest, LoadResponse, Operation, Phase,
    SyncRequest, SyncResponse, ToolCommands, UpdateRequest, UpdateResponse, WATCH_QUESTION,
};
pub use session::{Session, SessionId, SessionStore};
