//! Log Event Sink
//!
//! Forwards lifecycle events to `tracing` for human-readable runs.

use crate::domain::ports::{LifecycleEvent, LifecycleEventSink};

/// Event sink that logs every event
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEventSink;

impl LifecycleEventSink for LogEventSink {
    fn on_event(&self, event: LifecycleEvent) {
        match event {
            LifecycleEvent::PhaseStarted { phase, service } => {
                tracing::debug!(phase, service = %service, "phase started");
            }
            LifecycleEvent::PhaseCompleted { phase } => {
                tracing::debug!(phase, "phase completed");
            }
            LifecycleEvent::PhaseFailed { phase, error } => {
                tracing::error!(phase, error = %error, "phase failed");
            }
            LifecycleEvent::CommandStarted { command, dir } => {
                tracing::info!(command = %command, dir = %dir.display(), "running");
            }
            LifecycleEvent::FileWritten { path } => {
                tracing::debug!(path = %path.display(), "wrote");
            }
            LifecycleEvent::EndpointsResolved { count } => {
                tracing::info!(count, "endpoints resolved");
            }
            LifecycleEvent::FingerprintComputed { fingerprint } => {
                tracing::debug!(fingerprint = %fingerprint, "inputs fingerprinted");
            }
            LifecycleEvent::ImageBuilt { image } => {
                tracing::info!(image = %image, "image built");
            }
            LifecycleEvent::DeploymentApplied { image, replicas } => {
                tracing::info!(image = %image, replicas, "deployment applied");
            }
        }
    }
}
