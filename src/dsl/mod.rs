//! Transaction-build DSL subsystem.
//!
//! # Data Flow
//! ```text
//! untyped JSON action array
//!     → validate.rs (shape + field checks, all issues collected)
//!     → action.rs (closed tagged union, normalized payloads)
//!     → compiler::dispatch (applied in order to a builder handle)
//! ```
//!
//! # Design Decisions
//! - Validation is synchronous and runs before any network or SDK call
//! - Amounts are arbitrary-precision integers end to end; values routinely
//!   exceed the 53-bit range that lossy number types can carry
//! - Addresses and hashes are checked against fixed lexical grammars;
//!   checksum verification belongs to the ledger SDK binding

pub mod action;
pub mod amount;
pub mod lexical;
pub mod validate;

pub use action::{Action, Address, AssetId, FeeStrategy, StakeAddress, TxOutput, UtxoRef};
pub use amount::Coin;
pub use validate::{validate_action, validate_sequence, FieldIssue, ValidationFailure};
