//! The closed action model the validator normalizes into.
//!
//! Wire tags match the public DSL (`payLovelace`, `metadata`, ...); each
//! variant carries only the fields meaningful to it, already validated.

use serde::Serialize;
use serde_json::Value;

use crate::dsl::amount::Coin;

/// A validated payment address (lexical shape checked).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address(String);

impl Address {
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated stake (reward) address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StakeAddress(String);

impl StakeAddress {
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A native-asset identifier: `<56-hex-policy>.<hex-asset-name>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetId {
    pub policy: String,
    pub name_hex: String,
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.policy, self.name_hex)
    }
}

/// Reference to a UTXO: either an explicit `(txHash, index)` pair or an
/// opaque provider-native reference. Never neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum UtxoRef {
    Explicit { tx_hash: String, index: u64 },
    Native(String),
}

/// One output of a `payMany` action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TxOutput {
    pub to: Address,
    pub lovelace: Option<Coin>,
    pub assets: Vec<(AssetId, Coin)>,
}

/// Fee computation policy, applied after all other actions are staged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FeeStrategy {
    /// Linear size fee with an optional safety multiplier.
    Linear { multiplier: Option<f64> },
    /// Caller-supplied fixed fee.
    Fixed { fee: Coin },
}

/// A single validated DSL action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Action {
    PayLovelace {
        to: Address,
        lovelace: Coin,
    },
    PayAssets {
        to: Address,
        assets: Vec<(AssetId, Coin)>,
    },
    PayMany {
        outputs: Vec<TxOutput>,
    },
    Metadata {
        label: u64,
        payload: Value,
    },
    Validity {
        valid_from: Option<u64>,
        valid_to: Option<u64>,
    },
    RequiredSigner {
        key_hash: String,
    },
    ChangeAddress {
        address: Address,
    },
    Collateral {
        utxo: UtxoRef,
    },
    ReferenceInput {
        utxo: UtxoRef,
    },
    SpendUtxo {
        utxo: UtxoRef,
        redeemer: Option<Value>,
    },
    Mint {
        policy: String,
        assets: Vec<(String, Coin)>,
        redeemer: Option<Value>,
    },
    Burn {
        policy: String,
        assets: Vec<(String, Coin)>,
        redeemer: Option<Value>,
    },
    AttachScript {
        script_cbor: String,
    },
    StakeRegister {
        stake_address: StakeAddress,
    },
    StakeDeregister {
        stake_address: StakeAddress,
    },
    WithdrawRewards {
        stake_address: StakeAddress,
        amount: Option<Coin>,
    },
    FeePolicy {
        strategy: FeeStrategy,
    },
}

impl Action {
    /// The wire tag this action was submitted under.
    pub fn tag(&self) -> &'static str {
        match self {
            Action::PayLovelace { .. } => "payLovelace",
            Action::PayAssets { .. } => "payAssets",
            Action::PayMany { .. } => "payMany",
            Action::Metadata { .. } => "metadata",
            Action::Validity { .. } => "validity",
            Action::RequiredSigner { .. } => "requiredSigner",
            Action::ChangeAddress { .. } => "changeAddress",
            Action::Collateral { .. } => "collateral",
            Action::ReferenceInput { .. } => "referenceInput",
            Action::SpendUtxo { .. } => "spendUtxo",
            Action::Mint { .. } => "mint",
            Action::Burn { .. } => "burn",
            Action::AttachScript { .. } => "attachScript",
            Action::StakeRegister { .. } => "stakeRegister",
            Action::StakeDeregister { .. } => "stakeDeregister",
            Action::WithdrawRewards { .. } => "withdrawRewards",
            Action::FeePolicy { .. } => "feePolicy",
        }
    }
}
