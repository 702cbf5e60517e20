//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (OGMIOS_URL, KUPO_URL, DOLOS_*_URL)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; readiness is recomputed per request,
//!   so there is no hot-reload path
//! - All fields have defaults so the gateway runs with no config file at all
//! - Provider endpoints default to the docker-compose local addresses and
//!   can be overridden per endpoint through the environment
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::GatewayConfig;
pub use schema::ListenerConfig;
pub use schema::ProbeConfig;
pub use schema::ProviderConfig;
