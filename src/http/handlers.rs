//! Route handlers.
//!
//! Every handler follows the same discipline: validate first (no network
//! traffic for malformed input), resolve readiness fresh, then serve from
//! the chosen provider or compile against the ledger seam.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::balance;
use crate::compiler::dispatch::compile;
use crate::dsl::validate::{require_payment_address, validate_sequence};
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::providers::readiness::{resolve, ReadinessVerdict};

/// Process liveness, independent of any provider.
pub async fn liveness() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

#[derive(Serialize)]
pub struct StatusBody {
    pub success: bool,
    #[serde(flatten)]
    pub verdict: ReadinessVerdict,
}

/// Full readiness report with per-endpoint reachability.
pub async fn cardano_status(State(state): State<AppState>) -> Json<StatusBody> {
    let verdict = resolve(&state.prober, &state.config.providers).await;
    Json(StatusBody {
        success: verdict.ready,
        verdict,
    })
}

/// Boolean readiness; 503 when no provider is usable.
pub async fn cardano_readiness(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let verdict = resolve(&state.prober, &state.config.providers).await;
    let status = if verdict.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        Json(json!({"success": verdict.ready, "ready": verdict.ready})),
    )
}

/// Reachability report for the fallback family only.
pub async fn dolos_status(State(state): State<AppState>) -> Json<Value> {
    let providers = &state.config.providers;
    let dolos_rest_health_url = providers.dolos_rest_health_url();
    let (grpc, rest, healthy) = tokio::join!(
        state.prober.ping(&providers.dolos_grpc_url),
        state.prober.ping(&providers.dolos_rest_url),
        state.prober.health(&dolos_rest_health_url),
    );
    Json(json!({
        "success": true,
        "ready": healthy,
        "dolosGrpcReachable": grpc,
        "dolosRestReachable": rest,
        "dolosRestHealthy": healthy,
    }))
}

async fn proxy_json(state: &AppState, url: &str, what: &str) -> Result<Value, ApiError> {
    let response = state
        .prober
        .client()
        .get(url)
        .send()
        .await
        .map_err(|e| ApiError::Proxy(format!("{what} unreachable: {e}")))?;

    if !response.status().is_success() {
        return Err(ApiError::Proxy(format!(
            "{what} returned {}",
            response.status().as_u16()
        )));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| ApiError::Proxy(format!("{what} returned a non-JSON body: {e}")))
}

/// Proxy the fallback's dedicated health document.
pub async fn dolos_health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let url = state.config.providers.dolos_rest_health_url();
    let data = proxy_json(&state, &url, "Dolos health endpoint").await?;
    Ok(Json(json!({"success": true, "data": data})))
}

/// Proxy the fallback's root version document.
pub async fn dolos_version(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let url = state.config.providers.dolos_rest_url.clone();
    let data = proxy_json(&state, &url, "Dolos root endpoint").await?;
    Ok(Json(json!({"success": true, "data": data})))
}

/// Total lovelace balance for one address.
pub async fn address_balance(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let address = require_payment_address("address", &address)?;
    let verdict = resolve(&state.prober, &state.config.providers).await;
    let total = balance::address_balance(
        state.prober.client(),
        &state.config.providers,
        &verdict,
        address.as_str(),
    )
    .await?;
    Ok(Json(json!({"success": true, "lovelace": total.to_string()})))
}

/// Provider-native UTXO set for one address.
pub async fn address_utxos(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let address = require_payment_address("address", &address)?;
    let verdict = resolve(&state.prober, &state.config.providers).await;
    let utxos = balance::address_utxos(
        state.prober.client(),
        &state.config.providers,
        &verdict,
        address.as_str(),
    )
    .await?;
    Ok(Json(json!({"success": true, "utxos": utxos})))
}

async fn build_from_actions(
    state: &AppState,
    from_address: &str,
    actions: &[Value],
) -> Result<Json<Value>, ApiError> {
    // Validation first: malformed input never causes network traffic.
    let from = require_payment_address("fromAddress", from_address)?;
    let actions = validate_sequence(actions)?;

    // Readiness before compilation, so no partially built transaction is
    // ever left dangling on an unusable provider.
    let verdict = resolve(&state.prober, &state.config.providers).await;
    if !verdict.ready {
        return Err(balance::ProviderError::Unavailable {
            operation: "transaction build",
        }
        .into());
    }

    let tx = compile(state.sdk.as_ref(), &from, &actions)?;
    tracing::info!(
        from = %from,
        actions = actions.len(),
        provider = ?verdict.chosen_provider,
        "unsigned transaction built"
    );
    Ok(Json(json!({"success": true, "unsignedCbor": tx.into_hex()})))
}

/// Compile a generic DSL action sequence into an unsigned transaction.
pub async fn build_tx(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let from_address = body
        .get("fromAddress")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let actions = body
        .get("actions")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    build_from_actions(&state, from_address, &actions).await
}

/// Sugar: a single payLovelace action.
pub async fn build_send_ada(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let from_address = body
        .get("fromAddress")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let action = json!({
        "type": "payLovelace",
        "toAddress": body.get("toAddress").cloned().unwrap_or(Value::Null),
        "lovelace": body.get("lovelace").cloned().unwrap_or(Value::Null),
    });
    build_from_actions(&state, from_address, &[action]).await
}
