//! Observability subsystem.
//!
//! Structured logging via the tracing stack; the request-id layer in
//! `http::server` stamps every request so log lines correlate across
//! probe, validation and build stages.

pub mod logging;
