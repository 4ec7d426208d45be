//! Domain Layer
//!
//! Service identity, dependency sets, endpoints and the ports every
//! external collaborator sits behind.
//!
//! ## Structure
//!
//! - `entities/` - DependencySet, Endpoint, ServiceConfiguration, RenderedFile
//! - `value_objects/` - ServiceIdentity, ImageReference, Fingerprint, ApiKind
//! - `services/` - EndpointResolver, template sets
//! - `ports/` - Interface definitions for infrastructure

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
