//! DSL compilation subsystem.
//!
//! # Data Flow
//! ```text
//! validated ActionSequence
//!     → dispatch.rs (ordered fold, one builder call per action)
//!     → builder.rs (capability traits; unsupported ops fail hard)
//!     → staging.rs (shipped adapter: typed draft → serialized blob)
//! ```
//!
//! # Design Decisions
//! - One trait method per action tag; the ordered candidate operation
//!   names the underlying SDKs have used live in one table, so naming
//!   drift is confined to adapters
//! - Application is strictly sequential; later actions may override
//!   earlier ones, and the fee policy is evaluated only at finalize
//! - No partial results: any failed application aborts the whole build

pub mod builder;
pub mod dispatch;
pub mod staging;

pub use builder::{BuildError, BuildResult, BuilderHandle, LedgerSdk, UnsignedTx};
pub use dispatch::compile;
pub use staging::StagingSdk;
