//! HTTP surface subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → server.rs (Axum router, request ID, trace, timeout layers)
//!     → handlers.rs (validate → resolve readiness → compile/aggregate)
//!     → response.rs (success envelope or error → status mapping)
//! ```
//!
//! The route surface and response envelopes follow the public API the
//! wallet frontends already speak; everything here is thin plumbing over
//! the dsl/compiler/providers/balance cores.

pub mod handlers;
pub mod response;
pub mod server;

pub use response::ApiError;
pub use server::{AppState, HttpServer};
