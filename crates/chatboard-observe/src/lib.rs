//! Observability setup for Chatboard: structured logging with optional
//! OpenTelemetry span export.

pub mod tracing_setup;
