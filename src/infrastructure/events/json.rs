//! JSON Event Sink
//!
//! Outputs lifecycle events as NDJSON for orchestrators and CI.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{LifecycleEvent, LifecycleEventSink};

/// Event sink that outputs NDJSON events
pub struct JsonEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// JSON form of one event
pub fn event_json(event: &LifecycleEvent) -> serde_json::Value {
    match event {
        LifecycleEvent::PhaseStarted { phase, service } => serde_json::json!({
            "event": "phase_start",
            "phase": phase,
            "service": service,
        }),
        LifecycleEvent::PhaseCompleted { phase } => serde_json::json!({
            "event": "phase_complete",
            "phase": phase,
        }),
        LifecycleEvent::PhaseFailed { phase, error } => serde_json::json!({
            "event": "phase_error",
            "phase": phase,
            "error": error,
        }),
        LifecycleEvent::CommandStarted { command, dir } => serde_json::json!({
            "event": "command",
            "command": command,
            "dir": dir.display().to_string(),
        }),
        LifecycleEvent::FileWritten { path } => serde_json::json!({
            "event": "file_written",
            "path": path.display().to_string(),
        }),
        LifecycleEvent::EndpointsResolved { count } => serde_json::json!({
            "event": "endpoints",
            "count": count,
        }),
        LifecycleEvent::FingerprintComputed { fingerprint } => serde_json::json!({
            "event": "fingerprint",
            "fingerprint": fingerprint,
        }),
        LifecycleEvent::ImageBuilt { image } => serde_json::json!({
            "event": "image_built",
            "image": image,
        }),
        LifecycleEvent::DeploymentApplied { image, replicas } => serde_json::json!({
            "event": "deployed",
            "image": image,
            "replicas": replicas,
        }),
    }
}

impl LifecycleEventSink for JsonEventSink {
    fn on_event(&self, event: LifecycleEvent) {
        self.write_event(event_json(&event));
    }
}
