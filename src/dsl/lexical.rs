//! Lexical grammars for addresses, hashes and asset identifiers.
//!
//! These are shape checks only: a human-readable prefix, the bech32
//! separator and charset for addresses; fixed-width hex for hashes.

/// The bech32 data charset (no `1`, `b`, `i`, `o`).
const BECH32_CHARSET: &[u8] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

const PAYMENT_PREFIXES: [&str; 2] = ["addr", "addr_test"];
const STAKE_PREFIXES: [&str; 2] = ["stake", "stake_test"];

fn is_bech32_body(body: &str) -> bool {
    !body.is_empty() && body.bytes().all(|b| BECH32_CHARSET.contains(&b))
}

fn has_prefix(value: &str, prefixes: &[&str]) -> bool {
    // The separator is the *last* '1' in a bech32 string; prefixes here
    // contain no '1', so a plain split is equivalent.
    match value.split_once('1') {
        Some((hrp, body)) => prefixes.contains(&hrp) && is_bech32_body(body),
        None => false,
    }
}

/// True if `value` has the shape of a payment address.
pub fn is_payment_address(value: &str) -> bool {
    has_prefix(value, &PAYMENT_PREFIXES)
}

/// True if `value` has the shape of a stake (reward) address.
pub fn is_stake_address(value: &str) -> bool {
    has_prefix(value, &STAKE_PREFIXES)
}

/// True if `value` is non-empty hex of even length.
pub fn is_hex(value: &str) -> bool {
    !value.is_empty() && value.len() % 2 == 0 && value.bytes().all(|b| b.is_ascii_hexdigit())
}

/// True if `value` is a 56-hex-character policy id or key hash.
pub fn is_hash28(value: &str) -> bool {
    value.len() == 56 && value.bytes().all(|b| b.is_ascii_hexdigit())
}

/// True if `value` is a 64-hex-character transaction hash.
pub fn is_tx_hash(value: &str) -> bool {
    value.len() == 64 && value.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Split an asset identifier `<56-hex-policy>.<hex-asset-name>`.
///
/// The asset name may be empty (the on-chain "nameless" asset).
pub fn split_asset_id(value: &str) -> Option<(&str, &str)> {
    let (policy, name) = value.split_once('.')?;
    if !is_hash28(policy) {
        return None;
    }
    if !name.is_empty() && !(name.len() % 2 == 0 && name.bytes().all(|b| b.is_ascii_hexdigit())) {
        return None;
    }
    Some((policy, name))
}
