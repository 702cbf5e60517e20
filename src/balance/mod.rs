//! Balance and UTXO aggregation.
//!
//! # Responsibilities
//! - Fetch UTXOs from whichever provider family the readiness verdict chose
//! - Recognize the incompatible UTXO value shapes the providers return
//! - Sum lovelace with exact integer arithmetic, never floating point
//!
//! UTXO records stay provider-native (`serde_json::Value`); only the
//! lovelace extraction is normalized, so callers see exactly what the
//! provider said.

use num_bigint::BigUint;
use num_traits::Zero;
use serde_json::Value;
use thiserror::Error;

use crate::config::schema::ProviderConfig;
use crate::providers::readiness::{ChosenProvider, ReadinessVerdict};

/// Errors that can occur while querying providers.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Neither the indexer pair nor the fallback is usable.
    #[error("no reachable provider for {operation} (Kupmios/Dolos)")]
    Unavailable { operation: &'static str },

    /// The chosen provider answered with an error.
    #[error("provider request failed: {0}")]
    Upstream(String),
}

/// Result type for provider queries.
pub type ProviderResult<T> = Result<T, ProviderError>;

fn biguint_of(value: &Value) -> Option<BigUint> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    text.parse::<BigUint>().ok()
}

/// Extract the lovelace carried by one provider-native UTXO record.
///
/// Recognized shapes, summed when they coexist:
/// - Blockfrost-style `amount: [{unit: "lovelace", quantity}]`
/// - typed map `assets: {lovelace: n}`
/// - Kupo-style `value: {coins: n}`
/// - bare scalar `amount`
pub fn lovelace_of(utxo: &Value) -> BigUint {
    if let Some(entries) = utxo.get("amount").and_then(Value::as_array) {
        return entries
            .iter()
            .find(|entry| entry.get("unit").and_then(Value::as_str) == Some("lovelace"))
            .and_then(|entry| entry.get("quantity"))
            .and_then(biguint_of)
            .unwrap_or_else(BigUint::zero);
    }

    let mut total = BigUint::zero();
    if let Some(coin) = utxo
        .get("assets")
        .and_then(|assets| assets.get("lovelace"))
        .and_then(biguint_of)
    {
        total += coin;
    }
    if let Some(coin) = utxo
        .get("value")
        .and_then(|value| value.get("coins"))
        .and_then(biguint_of)
    {
        total += coin;
    }
    if let Some(coin) = utxo.get("amount").and_then(biguint_of) {
        total += coin;
    }
    total
}

/// Sum the lovelace over a set of UTXOs with exact integer arithmetic.
pub fn sum_lovelace(utxos: &[Value]) -> BigUint {
    utxos.iter().map(lovelace_of).sum()
}

async fn fetch_json_array(
    client: &reqwest::Client,
    url: &str,
    provider: &str,
) -> ProviderResult<Vec<Value>> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ProviderError::Upstream(format!("{provider}: {e}")))?;

    if !response.status().is_success() {
        return Err(ProviderError::Upstream(format!(
            "{provider} error: {}",
            response.status().as_u16()
        )));
    }

    // A non-array body is treated as "no UTXOs", matching the tolerant
    // behavior callers rely on during provider upgrades.
    let body = response.json::<Value>().await.unwrap_or(Value::Null);
    Ok(body.as_array().cloned().unwrap_or_default())
}

async fn kupo_utxos(
    client: &reqwest::Client,
    providers: &ProviderConfig,
    address: &str,
) -> ProviderResult<Vec<Value>> {
    let base = providers.kupo_url.trim_end_matches('/');
    let url = format!("{base}/matches/{address}?unspent");
    fetch_json_array(client, &url, "Kupo").await
}

async fn dolos_utxos(
    client: &reqwest::Client,
    providers: &ProviderConfig,
    address: &str,
) -> ProviderResult<Vec<Value>> {
    let base = providers.dolos_rest_url.trim_end_matches('/');
    let url = format!("{base}/api/v0/addresses/{address}/utxos");
    fetch_json_array(client, &url, "Dolos REST").await
}

/// Fetch the UTXO set for an address from the chosen provider.
pub async fn address_utxos(
    client: &reqwest::Client,
    providers: &ProviderConfig,
    verdict: &ReadinessVerdict,
    address: &str,
) -> ProviderResult<Vec<Value>> {
    match verdict.chosen_provider {
        Some(ChosenProvider::Kupmios) => kupo_utxos(client, providers, address).await,
        Some(ChosenProvider::DolosRest) => dolos_utxos(client, providers, address).await,
        None => Err(ProviderError::Unavailable { operation: "utxos" }),
    }
}

/// Total lovelace balance for an address.
pub async fn address_balance(
    client: &reqwest::Client,
    providers: &ProviderConfig,
    verdict: &ReadinessVerdict,
    address: &str,
) -> ProviderResult<BigUint> {
    if verdict.chosen_provider.is_none() {
        return Err(ProviderError::Unavailable {
            operation: "balance",
        });
    }
    let utxos = address_utxos(client, providers, verdict, address).await?;
    Ok(sum_lovelace(&utxos))
}
