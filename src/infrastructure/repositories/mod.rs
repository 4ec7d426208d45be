//! Repository Implementations
//!
//! Concrete implementations of repository ports.

mod service;

pub use service::YamlServiceRepository;
