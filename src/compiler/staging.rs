//! Shipped builder adapter: stages operations into a typed draft.
//!
//! # Responsibilities
//! - Support every DSL operation by staging it into an in-memory draft
//! - Evaluate the fee policy only after all other actions are staged
//! - Serialize the draft deterministically into the opaque unsigned blob
//!
//! Bindings against a full ledger SDK implement the same traits; this
//! adapter is the default wiring and the reference for dispatch order
//! semantics (identical sequences serialize to identical bytes).

use serde::Serialize;
use serde_json::Value;

use crate::compiler::builder::{
    BuildError, BuildResult, BuilderHandle, LedgerSdk, UnsignedTx,
};
use crate::dsl::action::{Address, AssetId, FeeStrategy, StakeAddress, TxOutput, UtxoRef};
use crate::dsl::amount::Coin;

/// Linear fee coefficient, lovelace per serialized byte.
const FEE_PER_BYTE: u64 = 44;
/// Linear fee constant, lovelace.
const FEE_CONSTANT: u64 = 155_381;

#[derive(Debug, Clone, Serialize)]
struct DraftInput {
    utxo: UtxoRef,
    redeemer: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
struct DraftMint {
    policy: String,
    assets: Vec<(String, Coin)>,
    burn: bool,
    redeemer: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
enum DraftCertificate {
    StakeRegistration(String),
    StakeDeregistration(String),
}

#[derive(Debug, Clone, Serialize)]
struct DraftWithdrawal {
    stake_address: String,
    amount: Option<Coin>,
}

/// The staged transaction, serialized as-is at finalize time.
#[derive(Debug, Default, Serialize)]
struct TxDraft {
    from: String,
    inputs: Vec<DraftInput>,
    outputs: Vec<TxOutput>,
    mints: Vec<DraftMint>,
    metadata: Vec<(u64, Value)>,
    valid_from: Option<u64>,
    valid_to: Option<u64>,
    required_signers: Vec<String>,
    change_address: Option<String>,
    collateral: Vec<UtxoRef>,
    reference_inputs: Vec<UtxoRef>,
    scripts: Vec<String>,
    certificates: Vec<DraftCertificate>,
    withdrawals: Vec<DraftWithdrawal>,
    fee: Coin,
}

fn encode(draft: &TxDraft) -> BuildResult<Vec<u8>> {
    bincode::serde::encode_to_vec(draft, bincode::config::standard())
        .map_err(|e| BuildError::Finalize(e.to_string()))
}

/// Builder handle staging every operation.
pub struct StagingBuilder {
    draft: TxDraft,
    fee_policy: FeeStrategy,
}

impl StagingBuilder {
    fn new(from: &Address) -> Self {
        Self {
            draft: TxDraft {
                from: from.as_str().to_string(),
                ..TxDraft::default()
            },
            fee_policy: FeeStrategy::Linear { multiplier: None },
        }
    }
}

impl BuilderHandle for StagingBuilder {
    fn pay_lovelace(&mut self, to: &Address, amount: &Coin) -> BuildResult<()> {
        self.draft.outputs.push(TxOutput {
            to: to.clone(),
            lovelace: Some(amount.clone()),
            assets: Vec::new(),
        });
        Ok(())
    }

    fn pay_assets(&mut self, to: &Address, assets: &[(AssetId, Coin)]) -> BuildResult<()> {
        self.draft.outputs.push(TxOutput {
            to: to.clone(),
            lovelace: None,
            assets: assets.to_vec(),
        });
        Ok(())
    }

    fn pay_many(&mut self, outputs: &[TxOutput]) -> BuildResult<()> {
        self.draft.outputs.extend_from_slice(outputs);
        Ok(())
    }

    fn add_metadata(&mut self, label: u64, payload: &Value) -> BuildResult<()> {
        self.draft.metadata.push((label, payload.clone()));
        Ok(())
    }

    fn valid_from(&mut self, slot: u64) -> BuildResult<()> {
        // Later windows overwrite earlier ones, like the underlying mutation.
        self.draft.valid_from = Some(slot);
        Ok(())
    }

    fn valid_to(&mut self, slot: u64) -> BuildResult<()> {
        self.draft.valid_to = Some(slot);
        Ok(())
    }

    fn add_required_signer(&mut self, key_hash: &str) -> BuildResult<()> {
        self.draft.required_signers.push(key_hash.to_string());
        Ok(())
    }

    fn change_address(&mut self, address: &Address) -> BuildResult<()> {
        self.draft.change_address = Some(address.as_str().to_string());
        Ok(())
    }

    fn add_collateral(&mut self, utxo: &UtxoRef) -> BuildResult<()> {
        self.draft.collateral.push(utxo.clone());
        Ok(())
    }

    fn add_reference_input(&mut self, utxo: &UtxoRef) -> BuildResult<()> {
        self.draft.reference_inputs.push(utxo.clone());
        Ok(())
    }

    fn spend_utxo(&mut self, utxo: &UtxoRef, redeemer: Option<&Value>) -> BuildResult<()> {
        self.draft.inputs.push(DraftInput {
            utxo: utxo.clone(),
            redeemer: redeemer.cloned(),
        });
        Ok(())
    }

    fn mint(
        &mut self,
        policy: &str,
        assets: &[(String, Coin)],
        redeemer: Option<&Value>,
    ) -> BuildResult<()> {
        self.draft.mints.push(DraftMint {
            policy: policy.to_string(),
            assets: assets.to_vec(),
            burn: false,
            redeemer: redeemer.cloned(),
        });
        Ok(())
    }

    fn burn(
        &mut self,
        policy: &str,
        assets: &[(String, Coin)],
        redeemer: Option<&Value>,
    ) -> BuildResult<()> {
        self.draft.mints.push(DraftMint {
            policy: policy.to_string(),
            assets: assets.to_vec(),
            burn: true,
            redeemer: redeemer.cloned(),
        });
        Ok(())
    }

    fn attach_script(&mut self, script_cbor: &str) -> BuildResult<()> {
        self.draft.scripts.push(script_cbor.to_string());
        Ok(())
    }

    fn register_stake(&mut self, stake: &StakeAddress) -> BuildResult<()> {
        self.draft
            .certificates
            .push(DraftCertificate::StakeRegistration(
                stake.as_str().to_string(),
            ));
        Ok(())
    }

    fn deregister_stake(&mut self, stake: &StakeAddress) -> BuildResult<()> {
        self.draft
            .certificates
            .push(DraftCertificate::StakeDeregistration(
                stake.as_str().to_string(),
            ));
        Ok(())
    }

    fn withdraw_rewards(
        &mut self,
        stake: &StakeAddress,
        amount: Option<&Coin>,
    ) -> BuildResult<()> {
        self.draft.withdrawals.push(DraftWithdrawal {
            stake_address: stake.as_str().to_string(),
            amount: amount.cloned(),
        });
        Ok(())
    }

    fn set_fee_policy(&mut self, strategy: &FeeStrategy) -> BuildResult<()> {
        self.fee_policy = strategy.clone();
        Ok(())
    }

    fn finalize(mut self: Box<Self>) -> BuildResult<UnsignedTx> {
        // The fee policy is evaluated last, against the fully staged draft.
        let fee = match &self.fee_policy {
            FeeStrategy::Fixed { fee } => fee.clone(),
            FeeStrategy::Linear { multiplier } => {
                let size = encode(&self.draft)?.len() as u64;
                let base = FEE_CONSTANT + FEE_PER_BYTE * size;
                match multiplier {
                    None => Coin::from(base),
                    Some(m) => Coin::from((base as f64 * m).ceil() as u64),
                }
            }
        };
        self.draft.fee = fee;

        let bytes = encode(&self.draft)?;
        Ok(UnsignedTx::from_bytes(&bytes))
    }
}

/// Default `LedgerSdk` wiring over the staging builder.
#[derive(Debug, Default, Clone)]
pub struct StagingSdk;

impl LedgerSdk for StagingSdk {
    fn new_transaction(&self, from: &Address) -> BuildResult<Box<dyn BuilderHandle>> {
        Ok(Box::new(StagingBuilder::new(from)))
    }
}
