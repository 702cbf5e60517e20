//! Provider probing and readiness subsystem.
//!
//! # Data Flow
//! ```text
//! request arrives
//!     → probe.rs (five concurrent GETs, per-probe deadlines)
//!     → readiness.rs (combine booleans into a ReadinessVerdict)
//!     → chosen provider family serves the request, or 503
//! ```
//!
//! # Design Decisions
//! - No verdict is ever cached: infrastructure health can flip between
//!   requests and a stale answer is worse than a probe round-trip
//! - The dual-indexer pair is all-or-nothing; the REST fallback stands
//!   alone behind its dedicated health endpoint
//! - Network errors, timeouts and aborts collapse into "not reachable"
//!   and are never surfaced to the caller

pub mod probe;
pub mod readiness;

pub use probe::Prober;
pub use readiness::{resolve, ChosenProvider, ReadinessVerdict};
