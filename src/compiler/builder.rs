//! Ledger builder capability seam.
//!
//! The underlying transaction SDKs have renamed their builder operations
//! across versions (`payAssets` vs `payTokens`, `addMetadata` vs
//! `attachMetadata`, ...). Instead of probing method names at runtime, the
//! gateway holds one trait method per DSL action; every method defaults to
//! an `Unsupported` failure that names the known aliases, and an adapter
//! overrides exactly the operations its SDK version exposes.

use serde_json::Value;
use thiserror::Error;

use crate::dsl::action::{Address, AssetId, FeeStrategy, StakeAddress, TxOutput, UtxoRef};
use crate::dsl::amount::Coin;

/// Errors that can occur while applying actions to a builder.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The active builder has no capability for this action.
    #[error("unsupported action '{action}': none of builder operations [{candidates}] available")]
    Unsupported {
        action: &'static str,
        candidates: &'static str,
    },

    /// The builder has the capability but rejected the payload.
    #[error("builder rejected '{action}': {reason}")]
    Rejected {
        action: &'static str,
        reason: String,
    },

    /// The staged transaction could not be finalized.
    #[error("failed to finalize transaction: {0}")]
    Finalize(String),

    /// Guard against a sequence that slipped past validation empty.
    #[error("action sequence must not be empty")]
    EmptySequence,
}

/// Result type for builder operations.
pub type BuildResult<T> = Result<T, BuildError>;

/// A serialized unsigned transaction, hex-encoded. Opaque to the gateway;
/// the caller signs it externally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTx(String);

impl UnsignedTx {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(hex::encode(bytes))
    }

    pub fn as_hex(&self) -> &str {
        &self.0
    }

    pub fn into_hex(self) -> String {
        self.0
    }
}

fn unsupported(action: &'static str, candidates: &'static str) -> BuildError {
    BuildError::Unsupported { action, candidates }
}

/// One in-progress transaction bound to a source address.
///
/// Default bodies report the operation as unsupported; adapters override
/// what their SDK version can do. The candidate lists are the operation
/// names successive SDK versions have shipped, most recent first.
pub trait BuilderHandle: Send {
    fn pay_lovelace(&mut self, _to: &Address, _amount: &Coin) -> BuildResult<()> {
        Err(unsupported("payLovelace", "payLovelace"))
    }

    fn pay_assets(&mut self, _to: &Address, _assets: &[(AssetId, Coin)]) -> BuildResult<()> {
        Err(unsupported("payAssets", "payAssets, payTokens"))
    }

    fn pay_many(&mut self, _outputs: &[TxOutput]) -> BuildResult<()> {
        Err(unsupported("payMany", "payMany"))
    }

    fn add_metadata(&mut self, _label: u64, _payload: &Value) -> BuildResult<()> {
        Err(unsupported("metadata", "addMetadata, metadata, attachMetadata"))
    }

    fn valid_from(&mut self, _slot: u64) -> BuildResult<()> {
        Err(unsupported("validity", "validFrom"))
    }

    fn valid_to(&mut self, _slot: u64) -> BuildResult<()> {
        Err(unsupported("validity", "validTo, ttl"))
    }

    fn add_required_signer(&mut self, _key_hash: &str) -> BuildResult<()> {
        Err(unsupported("requiredSigner", "addRequiredSigner, requiredSigner"))
    }

    fn change_address(&mut self, _address: &Address) -> BuildResult<()> {
        Err(unsupported("changeAddress", "changeAddress, setChangeAddress"))
    }

    fn add_collateral(&mut self, _utxo: &UtxoRef) -> BuildResult<()> {
        Err(unsupported("collateral", "collateral, setCollateral"))
    }

    fn add_reference_input(&mut self, _utxo: &UtxoRef) -> BuildResult<()> {
        Err(unsupported("referenceInput", "referenceInput, readFrom"))
    }

    fn spend_utxo(&mut self, _utxo: &UtxoRef, _redeemer: Option<&Value>) -> BuildResult<()> {
        Err(unsupported("spendUtxo", "spendUtxo, collectFrom"))
    }

    fn mint(
        &mut self,
        _policy: &str,
        _assets: &[(String, Coin)],
        _redeemer: Option<&Value>,
    ) -> BuildResult<()> {
        Err(unsupported("mint", "mintAssets, mint"))
    }

    fn burn(
        &mut self,
        _policy: &str,
        _assets: &[(String, Coin)],
        _redeemer: Option<&Value>,
    ) -> BuildResult<()> {
        Err(unsupported("burn", "burnAssets, burn"))
    }

    fn attach_script(&mut self, _script_cbor: &str) -> BuildResult<()> {
        Err(unsupported(
            "attachScript",
            "attachScript, attachSpendingValidator, attachMintingPolicy",
        ))
    }

    fn register_stake(&mut self, _stake: &StakeAddress) -> BuildResult<()> {
        Err(unsupported("stakeRegister", "registerStake, stakeRegister"))
    }

    fn deregister_stake(&mut self, _stake: &StakeAddress) -> BuildResult<()> {
        Err(unsupported("stakeDeregister", "deregisterStake, stakeDeregister"))
    }

    fn withdraw_rewards(
        &mut self,
        _stake: &StakeAddress,
        _amount: Option<&Coin>,
    ) -> BuildResult<()> {
        Err(unsupported("withdrawRewards", "withdrawRewards, withdraw"))
    }

    fn set_fee_policy(&mut self, _strategy: &FeeStrategy) -> BuildResult<()> {
        Err(unsupported("feePolicy", "setFeePolicy, feePolicy"))
    }

    /// Finalize the staged transaction into its serialized form.
    fn finalize(self: Box<Self>) -> BuildResult<UnsignedTx>;
}

/// Factory for builder handles, bound to one SDK binding.
pub trait LedgerSdk: Send + Sync {
    /// Start a new transaction for the given source address.
    fn new_transaction(&self, from: &Address) -> BuildResult<Box<dyn BuilderHandle>>;
}
