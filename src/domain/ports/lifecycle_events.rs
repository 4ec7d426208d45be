//! Lifecycle Event Port
//!
//! Observable interface for lifecycle phases.
//! Enables JSON event streams for orchestrators and CI.

use std::path::PathBuf;

/// Event emitted during lifecycle phases
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Phase started
    PhaseStarted {
        phase: &'static str,
        service: String,
    },

    /// Phase finished successfully
    PhaseCompleted { phase: &'static str },

    /// Phase failed; the error is returned to the caller as well
    PhaseFailed { phase: &'static str, error: String },

    /// External command about to run
    CommandStarted { command: String, dir: PathBuf },

    /// A rendered file was written
    FileWritten { path: PathBuf },

    /// Endpoints were (re)derived
    EndpointsResolved { count: usize },

    /// Build inputs were fingerprinted
    FingerprintComputed { fingerprint: String },

    /// Image was produced
    ImageBuilt { image: String },

    /// Deployment was handed to the applier
    DeploymentApplied { image: String, replicas: u32 },
}

/// Trait for receiving lifecycle events
///
/// Implementations:
/// - `JsonEventSink`: NDJSON event stream
/// - `NoopEventSink`: silent operation
pub trait LifecycleEventSink: Send + Sync {
    fn on_event(&self, event: LifecycleEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl LifecycleEventSink for NoopEventSink {
    fn on_event(&self, _event: LifecycleEvent) {}
}
