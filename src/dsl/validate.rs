//! Action schema validation.
//!
//! # Responsibilities
//! - Type-check one untyped JSON action against its declared shape
//! - Normalize payloads into the closed `Action` union
//! - Collect every field-level issue for an action, not just the first,
//!   so a caller can fix a whole batch in one round trip
//!
//! Validation is pure and synchronous; it always runs before any network
//! or builder call.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::dsl::action::{
    Action, Address, AssetId, FeeStrategy, StakeAddress, TxOutput, UtxoRef,
};
use crate::dsl::amount::{parse_amount, parse_slot, Coin};
use crate::dsl::lexical;

/// One field-level validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

/// A failed validation, carrying every issue found.
#[derive(Debug, Clone)]
pub struct ValidationFailure {
    pub issues: Vec<FieldIssue>,
}

impl ValidationFailure {
    fn single(field: &str, message: &str) -> Self {
        Self {
            issues: vec![FieldIssue {
                field: field.to_string(),
                message: message.to_string(),
            }],
        }
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed: ")?;
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", issue.field, issue.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

struct Issues {
    prefix: String,
    items: Vec<FieldIssue>,
}

impl Issues {
    fn new(prefix: String) -> Self {
        Self {
            prefix,
            items: Vec::new(),
        }
    }

    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.items.push(FieldIssue {
            field: format!("{}{}", self.prefix, field),
            message: message.into(),
        });
    }
}

/// Validate a standalone address string (route parameters, `fromAddress`).
pub fn require_payment_address(field: &str, value: &str) -> Result<Address, ValidationFailure> {
    if lexical::is_payment_address(value) {
        Ok(Address::new_unchecked(value.to_string()))
    } else {
        Err(ValidationFailure::single(
            field,
            "is not a valid bech32 payment address",
        ))
    }
}

// JSON null is treated the same as an absent field throughout.
fn field<'a>(map: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    map.get(name).filter(|v| !v.is_null())
}

fn str_field<'a>(
    map: &'a Map<String, Value>,
    name: &str,
    issues: &mut Issues,
) -> Option<&'a str> {
    match field(map, name) {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::String(_)) => {
            issues.push(name, "must not be empty");
            None
        }
        Some(_) => {
            issues.push(name, "must be a string");
            None
        }
        None => {
            issues.push(name, "is required");
            None
        }
    }
}

fn address_field(
    map: &Map<String, Value>,
    name: &str,
    issues: &mut Issues,
) -> Option<Address> {
    let raw = str_field(map, name, issues)?;
    if lexical::is_payment_address(raw) {
        Some(Address::new_unchecked(raw.to_string()))
    } else {
        issues.push(name, "is not a valid bech32 payment address");
        None
    }
}

fn stake_address_field(
    map: &Map<String, Value>,
    name: &str,
    issues: &mut Issues,
) -> Option<StakeAddress> {
    let raw = str_field(map, name, issues)?;
    if lexical::is_stake_address(raw) {
        Some(StakeAddress::new_unchecked(raw.to_string()))
    } else {
        issues.push(name, "is not a valid bech32 stake address");
        None
    }
}

fn coin_value(raw: &Value, name: &str, positive: bool, issues: &mut Issues) -> Option<Coin> {
    match parse_amount(raw) {
        Ok(coin) => {
            if positive && coin.is_zero() {
                issues.push(name, "must be strictly positive");
                None
            } else {
                Some(coin)
            }
        }
        Err(err) => {
            issues.push(name, err.message());
            None
        }
    }
}

fn amount_field(
    map: &Map<String, Value>,
    name: &str,
    positive: bool,
    issues: &mut Issues,
) -> Option<Coin> {
    match field(map, name) {
        Some(raw) => coin_value(raw, name, positive, issues),
        None => {
            issues.push(name, "is required");
            None
        }
    }
}

fn hash28_field(map: &Map<String, Value>, name: &str, issues: &mut Issues) -> Option<String> {
    let raw = str_field(map, name, issues)?;
    if lexical::is_hash28(raw) {
        Some(raw.to_string())
    } else {
        issues.push(name, "must be exactly 56 hexadecimal characters");
        None
    }
}

/// Asset map keyed by `<policy>.<name>` identifiers.
fn asset_map(
    map: &Map<String, Value>,
    name: &str,
    issues: &mut Issues,
) -> Option<Vec<(AssetId, Coin)>> {
    let raw = match field(map, name) {
        Some(Value::Object(entries)) if !entries.is_empty() => entries,
        Some(Value::Object(_)) => {
            issues.push(name, "must contain at least one asset");
            return None;
        }
        Some(_) => {
            issues.push(name, "must be an object of asset quantities");
            return None;
        }
        None => {
            issues.push(name, "is required");
            return None;
        }
    };

    let before = issues.items.len();
    let mut assets = Vec::with_capacity(raw.len());
    for (unit, quantity) in raw {
        let path = format!("{name}.{unit}");
        match lexical::split_asset_id(unit) {
            Some((policy, asset_name)) => {
                if let Some(coin) = coin_value(quantity, &path, true, issues) {
                    assets.push((
                        AssetId {
                            policy: policy.to_string(),
                            name_hex: asset_name.to_string(),
                        },
                        coin,
                    ));
                }
            }
            None => issues.push(
                &path,
                "asset identifier must be '<56-hex-policy>.<hex-asset-name>'",
            ),
        }
    }
    (issues.items.len() == before).then_some(assets)
}

/// Asset map keyed by bare hex asset names (mint/burn, policy given apart).
fn asset_name_map(
    map: &Map<String, Value>,
    name: &str,
    issues: &mut Issues,
) -> Option<Vec<(String, Coin)>> {
    let raw = match field(map, name) {
        Some(Value::Object(entries)) if !entries.is_empty() => entries,
        Some(Value::Object(_)) => {
            issues.push(name, "must contain at least one asset");
            return None;
        }
        Some(_) => {
            issues.push(name, "must be an object of asset quantities");
            return None;
        }
        None => {
            issues.push(name, "is required");
            return None;
        }
    };

    let before = issues.items.len();
    let mut assets = Vec::with_capacity(raw.len());
    for (asset_name, quantity) in raw {
        let path = format!("{name}.{asset_name}");
        let name_ok = asset_name.is_empty() || lexical::is_hex(asset_name);
        if !name_ok {
            issues.push(&path, "asset name must be hex");
            continue;
        }
        if let Some(coin) = coin_value(quantity, &path, true, issues) {
            assets.push((asset_name.clone(), coin));
        }
    }
    (issues.items.len() == before).then_some(assets)
}

/// Cross-field UTXO reference: explicit `(txHash, index)` or an opaque
/// provider-native reference, but not neither.
fn utxo_ref(map: &Map<String, Value>, issues: &mut Issues) -> Option<UtxoRef> {
    if field(map, "txHash").is_some() {
        let tx_hash = match str_field(map, "txHash", issues) {
            Some(raw) if lexical::is_tx_hash(raw) => Some(raw.to_string()),
            Some(_) => {
                issues.push("txHash", "must be exactly 64 hexadecimal characters");
                None
            }
            None => None,
        };
        let index = match field(map, "index") {
            Some(raw) => match parse_slot(raw) {
                Some(i) => Some(i),
                None => {
                    issues.push("index", "must be a non-negative integer");
                    None
                }
            },
            None => {
                issues.push("index", "is required alongside txHash");
                None
            }
        };
        return match (tx_hash, index) {
            (Some(tx_hash), Some(index)) => Some(UtxoRef::Explicit { tx_hash, index }),
            _ => None,
        };
    }

    match field(map, "utxo") {
        Some(Value::String(s)) if !s.is_empty() => Some(UtxoRef::Native(s.clone())),
        Some(Value::Object(inner)) => {
            // Nested { txHash, index } object form.
            let mut nested = Issues::new(format!("{}utxo.", issues.prefix));
            let reference = utxo_ref(inner, &mut nested);
            issues.items.append(&mut nested.items);
            reference
        }
        Some(_) => {
            issues.push("utxo", "must be a reference string or a txHash/index object");
            None
        }
        None => {
            issues.push("utxo", "either txHash/index or utxo is required");
            None
        }
    }
}

fn label_field(map: &Map<String, Value>, issues: &mut Issues) -> Option<u64> {
    match field(map, "label") {
        // 721 is the conventional token-metadata label.
        None => Some(721),
        Some(raw) => match parse_slot(raw) {
            Some(label) => Some(label),
            None => {
                issues.push("label", "must be a non-negative integer");
                None
            }
        },
    }
}

fn fee_strategy(map: &Map<String, Value>, issues: &mut Issues) -> Option<FeeStrategy> {
    let strategy = match field(map, "strategy") {
        None => "linear",
        Some(Value::String(s)) => s.as_str(),
        Some(_) => {
            issues.push("strategy", "must be a string");
            return None;
        }
    };
    match strategy {
        "linear" => {
            let multiplier = match field(map, "multiplier") {
                None => None,
                Some(raw) => match raw.as_f64() {
                    Some(m) if m.is_finite() && m > 0.0 => Some(m),
                    _ => {
                        issues.push("multiplier", "must be a positive number");
                        return None;
                    }
                },
            };
            Some(FeeStrategy::Linear { multiplier })
        }
        "fixed" => {
            let fee = amount_field(map, "fee", false, issues)?;
            Some(FeeStrategy::Fixed { fee })
        }
        other => {
            issues.push("strategy", format!("unknown fee strategy '{other}'"));
            None
        }
    }
}

fn outputs_field(map: &Map<String, Value>, issues: &mut Issues) -> Option<Vec<TxOutput>> {
    let raw = match field(map, "outputs") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        Some(Value::Array(_)) => {
            issues.push("outputs", "must contain at least one output");
            return None;
        }
        Some(_) => {
            issues.push("outputs", "must be an array");
            return None;
        }
        None => {
            issues.push("outputs", "is required");
            return None;
        }
    };

    let before = issues.items.len();
    let mut outputs = Vec::with_capacity(raw.len());
    for (i, item) in raw.iter().enumerate() {
        let mut inner = Issues::new(format!("{}outputs[{i}].", issues.prefix));
        match item.as_object() {
            Some(entry) => {
                let to = address_field(entry, "toAddress", &mut inner);
                let lovelace = match field(entry, "lovelace") {
                    Some(raw) => coin_value(raw, "lovelace", true, &mut inner),
                    None => None,
                };
                let assets = match field(entry, "assets") {
                    Some(_) => asset_map(entry, "assets", &mut inner),
                    None => None,
                };
                if field(entry, "lovelace").is_none() && field(entry, "assets").is_none() {
                    inner.push("lovelace", "output must carry lovelace or assets");
                }
                if let Some(to) = to {
                    outputs.push(TxOutput {
                        to,
                        lovelace,
                        assets: assets.unwrap_or_default(),
                    });
                }
            }
            None => inner.push("", "output must be an object"),
        }
        issues.items.append(&mut inner.items);
    }
    (issues.items.len() == before).then_some(outputs)
}

fn validate_one(raw: &Value, prefix: String) -> Result<Action, Vec<FieldIssue>> {
    let mut issues = Issues::new(prefix);

    let Some(map) = raw.as_object() else {
        issues.push("", "action must be an object");
        return Err(issues.items);
    };

    let tag = match field(map, "type") {
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            issues.push("type", "must be a string");
            return Err(issues.items);
        }
        None => {
            issues.push("type", "is required");
            return Err(issues.items);
        }
    };

    let action = match tag.as_str() {
        "payLovelace" => {
            let to = address_field(map, "toAddress", &mut issues);
            let lovelace = amount_field(map, "lovelace", true, &mut issues);
            to.zip(lovelace)
                .map(|(to, lovelace)| Action::PayLovelace { to, lovelace })
        }
        "payAssets" => {
            let to = address_field(map, "toAddress", &mut issues);
            let assets = asset_map(map, "assets", &mut issues);
            to.zip(assets)
                .map(|(to, assets)| Action::PayAssets { to, assets })
        }
        "payMany" => outputs_field(map, &mut issues).map(|outputs| Action::PayMany { outputs }),
        "metadata" => {
            let label = label_field(map, &mut issues);
            let payload = match field(map, "metadata") {
                Some(value) => Some(value.clone()),
                None => {
                    issues.push("metadata", "is required");
                    None
                }
            };
            label
                .zip(payload)
                .map(|(label, payload)| Action::Metadata { label, payload })
        }
        "validity" => {
            let mut bound = |name: &str| match field(map, name) {
                None => Some(None),
                Some(raw) => match parse_slot(raw) {
                    Some(slot) => Some(Some(slot)),
                    None => {
                        issues.push(name, "must be a non-negative integer slot");
                        None
                    }
                },
            };
            let valid_from = bound("validFrom");
            let valid_to = bound("validTo");
            valid_from
                .zip(valid_to)
                .map(|(valid_from, valid_to)| Action::Validity {
                    valid_from,
                    valid_to,
                })
        }
        "requiredSigner" => {
            // Older clients submitted the hash under `pubKeyHash`.
            let name = if field(map, "keyHash").is_some() || field(map, "pubKeyHash").is_none() {
                "keyHash"
            } else {
                "pubKeyHash"
            };
            hash28_field(map, name, &mut issues).map(|key_hash| Action::RequiredSigner { key_hash })
        }
        "changeAddress" => {
            let name = if field(map, "address").is_some() || field(map, "changeAddress").is_none() {
                "address"
            } else {
                "changeAddress"
            };
            address_field(map, name, &mut issues).map(|address| Action::ChangeAddress { address })
        }
        "collateral" => utxo_ref(map, &mut issues).map(|utxo| Action::Collateral { utxo }),
        "referenceInput" => {
            utxo_ref(map, &mut issues).map(|utxo| Action::ReferenceInput { utxo })
        }
        "spendUtxo" => utxo_ref(map, &mut issues).map(|utxo| Action::SpendUtxo {
            utxo,
            redeemer: field(map, "redeemer").cloned(),
        }),
        "mint" => {
            let policy = hash28_field(map, "policyId", &mut issues);
            let assets = asset_name_map(map, "assets", &mut issues);
            policy.zip(assets).map(|(policy, assets)| Action::Mint {
                policy,
                assets,
                redeemer: field(map, "redeemer").cloned(),
            })
        }
        "burn" => {
            let policy = hash28_field(map, "policyId", &mut issues);
            let assets = asset_name_map(map, "assets", &mut issues);
            policy.zip(assets).map(|(policy, assets)| Action::Burn {
                policy,
                assets,
                redeemer: field(map, "redeemer").cloned(),
            })
        }
        "attachScript" => {
            let script = match str_field(map, "scriptCbor", &mut issues) {
                Some(raw) if lexical::is_hex(raw) => Some(raw.to_string()),
                Some(_) => {
                    issues.push("scriptCbor", "must be hex-encoded CBOR");
                    None
                }
                None => None,
            };
            script.map(|script_cbor| Action::AttachScript { script_cbor })
        }
        "stakeRegister" => stake_address_field(map, "stakeAddress", &mut issues)
            .map(|stake_address| Action::StakeRegister { stake_address }),
        "stakeDeregister" => stake_address_field(map, "stakeAddress", &mut issues)
            .map(|stake_address| Action::StakeDeregister { stake_address }),
        "withdrawRewards" => {
            let stake_address = stake_address_field(map, "stakeAddress", &mut issues);
            let amount = match field(map, "amount") {
                None => Some(None),
                Some(raw) => coin_value(raw, "amount", false, &mut issues).map(Some),
            };
            stake_address
                .zip(amount)
                .map(|(stake_address, amount)| Action::WithdrawRewards {
                    stake_address,
                    amount,
                })
        }
        "feePolicy" => {
            fee_strategy(map, &mut issues).map(|strategy| Action::FeePolicy { strategy })
        }
        other => {
            issues.push("type", format!("unknown action type '{other}'"));
            None
        }
    };

    match action {
        Some(action) if issues.items.is_empty() => Ok(action),
        _ => {
            debug_assert!(!issues.items.is_empty());
            Err(issues.items)
        }
    }
}

/// Validate and normalize a single untyped action.
pub fn validate_action(raw: &Value) -> Result<Action, ValidationFailure> {
    validate_one(raw, String::new()).map_err(|issues| ValidationFailure { issues })
}

/// Validate a whole action sequence.
///
/// The sequence must be non-empty; issues from every offending action are
/// collected, with fields prefixed by the action's position.
pub fn validate_sequence(actions: &[Value]) -> Result<Vec<Action>, ValidationFailure> {
    if actions.is_empty() {
        return Err(ValidationFailure::single(
            "actions",
            "must contain at least one action",
        ));
    }

    let mut validated = Vec::with_capacity(actions.len());
    let mut issues = Vec::new();
    for (i, raw) in actions.iter().enumerate() {
        match validate_one(raw, format!("actions[{i}].")) {
            Ok(action) => validated.push(action),
            Err(mut action_issues) => issues.append(&mut action_issues),
        }
    }

    if issues.is_empty() {
        Ok(validated)
    } else {
        Err(ValidationFailure { issues })
    }
}
