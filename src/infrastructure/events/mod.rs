//! Event Sink Implementations
//!
//! - JsonEventSink: NDJSON output for orchestrators and CI
//! - LogEventSink: forwards events to `tracing`

mod json;
mod log;

pub use json::{event_json, JsonEventSink};
pub use log::LogEventSink;
