//! Action dispatch over a builder handle.
//!
//! The fold is strictly sequential: later actions may depend on or
//! override earlier ones, so applications are never parallelized. A
//! failure anywhere aborts the whole sequence; no partial transaction is
//! ever returned.

use crate::compiler::builder::{BuildError, BuildResult, BuilderHandle, LedgerSdk, UnsignedTx};
use crate::dsl::action::{Action, Address};

/// Apply one validated action to the handle via its designated operation.
pub fn apply_action(handle: &mut dyn BuilderHandle, action: &Action) -> BuildResult<()> {
    match action {
        Action::PayLovelace { to, lovelace } => handle.pay_lovelace(to, lovelace),
        Action::PayAssets { to, assets } => handle.pay_assets(to, assets),
        Action::PayMany { outputs } => handle.pay_many(outputs),
        Action::Metadata { label, payload } => handle.add_metadata(*label, payload),
        Action::Validity {
            valid_from,
            valid_to,
        } => {
            // Apply only the bounds that were present.
            if let Some(slot) = valid_from {
                handle.valid_from(*slot)?;
            }
            if let Some(slot) = valid_to {
                handle.valid_to(*slot)?;
            }
            Ok(())
        }
        Action::RequiredSigner { key_hash } => handle.add_required_signer(key_hash),
        Action::ChangeAddress { address } => handle.change_address(address),
        Action::Collateral { utxo } => handle.add_collateral(utxo),
        Action::ReferenceInput { utxo } => handle.add_reference_input(utxo),
        Action::SpendUtxo { utxo, redeemer } => handle.spend_utxo(utxo, redeemer.as_ref()),
        Action::Mint {
            policy,
            assets,
            redeemer,
        } => handle.mint(policy, assets, redeemer.as_ref()),
        Action::Burn {
            policy,
            assets,
            redeemer,
        } => handle.burn(policy, assets, redeemer.as_ref()),
        Action::AttachScript { script_cbor } => handle.attach_script(script_cbor),
        Action::StakeRegister { stake_address } => handle.register_stake(stake_address),
        Action::StakeDeregister { stake_address } => handle.deregister_stake(stake_address),
        Action::WithdrawRewards {
            stake_address,
            amount,
        } => handle.withdraw_rewards(stake_address, amount.as_ref()),
        Action::FeePolicy { strategy } => handle.set_fee_policy(strategy),
    }
}

/// Compile a validated, non-empty action sequence into an unsigned
/// transaction. Atomic: either every action applies or the build fails.
pub fn compile(
    sdk: &dyn LedgerSdk,
    from: &Address,
    actions: &[Action],
) -> BuildResult<UnsignedTx> {
    if actions.is_empty() {
        return Err(BuildError::EmptySequence);
    }

    let mut handle = sdk.new_transaction(from)?;
    for action in actions {
        apply_action(handle.as_mut(), action)?;
        tracing::debug!(action = action.tag(), "action applied");
    }

    handle.finalize()
}
