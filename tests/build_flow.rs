//! End-to-end transaction build flow.

use serde_json::{json, Value};

mod common;
use common::{base_config, http_url, spawn_gateway, start_mock_backend};

async fn post_json(url: &str, body: &Value) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(url)
        .json(body)
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    let body = response.json::<Value>().await.unwrap();
    (status, body)
}

/// Gateway with the dual-indexer pair up and the fallback down.
async fn ready_gateway() -> String {
    let ogmios = start_mock_backend(200, "{}").await;
    let kupo = start_mock_backend(200, "{}").await;

    let mut config = base_config();
    config.providers.ogmios_url = http_url(ogmios);
    config.providers.kupo_url = http_url(kupo);
    spawn_gateway(config).await
}

#[tokio::test]
async fn test_builds_unsigned_tx_from_multiple_actions() {
    let base = ready_gateway().await;

    let (status, body) = post_json(
        &format!("{base}/cardano/txs/build"),
        &json!({
            "fromAddress": "addr_test1qpfr0mxxx",
            "actions": [
                {"type": "payLovelace", "toAddress": "addr_test1qpt0", "lovelace": "2000000"},
                {"type": "metadata", "label": 674, "metadata": {"msg": "hello"}},
                {"type": "validity", "validFrom": "100", "validTo": "200"},
                {"type": "requiredSigner", "keyHash": "ab".repeat(28)}
            ]
        }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    let cbor = body["unsignedCbor"].as_str().unwrap();
    assert!(!cbor.is_empty());
    assert!(cbor.bytes().all(|b| b.is_ascii_hexdigit()));
}

#[tokio::test]
async fn test_same_sequence_builds_identical_blob() {
    let base = ready_gateway().await;
    let request = json!({
        "fromAddress": "addr_test1qpfr0mxxx",
        "actions": [
            {"type": "payLovelace", "toAddress": "addr_test1qpt0", "lovelace": "2000000"},
            {"type": "validity", "validTo": "500"}
        ]
    });

    let (_, first) = post_json(&format!("{base}/cardano/txs/build"), &request).await;
    let (_, second) = post_json(&format!("{base}/cardano/txs/build"), &request).await;
    assert_eq!(first["unsignedCbor"], second["unsignedCbor"]);
}

#[tokio::test]
async fn test_empty_action_sequence_rejected() {
    let base = ready_gateway().await;

    let (status, body) = post_json(
        &format!("{base}/cardano/txs/build"),
        &json!({"fromAddress": "addr_test1qpfr0mxxx", "actions": []}),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_unknown_action_type_rejected() {
    let base = ready_gateway().await;

    let (status, body) = post_json(
        &format!("{base}/cardano/txs/build"),
        &json!({
            "fromAddress": "addr_test1qpfr0mxxx",
            "actions": [{"type": "notARealAction"}]
        }),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    let issues = body["issues"].as_array().unwrap();
    assert!(issues[0]["message"]
        .as_str()
        .unwrap()
        .contains("notARealAction"));
}

#[tokio::test]
async fn test_validation_errors_are_collected() {
    let base = ready_gateway().await;

    let (status, body) = post_json(
        &format!("{base}/cardano/txs/build"),
        &json!({
            "fromAddress": "addr_test1qpfr0mxxx",
            "actions": [
                {"type": "payLovelace", "toAddress": "not-an-addr", "lovelace": "-100"}
            ]
        }),
    )
    .await;

    assert_eq!(status, 400);
    let issues = body["issues"].as_array().unwrap();
    assert_eq!(issues.len(), 2);
}

#[tokio::test]
async fn test_invalid_from_address_rejected() {
    let base = ready_gateway().await;

    let (status, _) = post_json(
        &format!("{base}/cardano/txs/build"),
        &json!({
            "fromAddress": "bogus",
            "actions": [
                {"type": "payLovelace", "toAddress": "addr_test1qpt0", "lovelace": "1"}
            ]
        }),
    )
    .await;

    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_validation_runs_before_any_provider_probe() {
    // Every provider is down, yet malformed input still yields 400, not
    // 503: validation must win the race to reject.
    let base = spawn_gateway(base_config()).await;

    let (status, _) = post_json(
        &format!("{base}/cardano/txs/build"),
        &json!({"fromAddress": "addr_test1qpfr0mxxx", "actions": []}),
    )
    .await;

    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_build_requires_a_usable_provider() {
    let base = spawn_gateway(base_config()).await;

    let (status, body) = post_json(
        &format!("{base}/cardano/txs/build"),
        &json!({
            "fromAddress": "addr_test1qpfr0mxxx",
            "actions": [
                {"type": "payLovelace", "toAddress": "addr_test1qpt0", "lovelace": "1"}
            ]
        }),
    )
    .await;

    assert_eq!(status, 503);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_send_ada_sugar() {
    let base = ready_gateway().await;

    let (status, body) = post_json(
        &format!("{base}/cardano/txs/build/send-ada"),
        &json!({
            "fromAddress": "addr_test1qpfr0maddressxxx",
            "toAddress": "addr_test1qpt0addressyyy",
            "lovelace": "2000000"
        }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert!(body["unsignedCbor"].as_str().is_some());
}

#[tokio::test]
async fn test_send_ada_rejects_empty_input() {
    let base = ready_gateway().await;

    let (status, body) =
        post_json(&format!("{base}/cardano/txs/build/send-ada"), &json!({})).await;

    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_amounts_beyond_53_bits_survive_exactly() {
    let base = ready_gateway().await;
    let huge = "45000000000000000001";

    let (status, body) = post_json(
        &format!("{base}/cardano/txs/build"),
        &json!({
            "fromAddress": "addr_test1qpfr0mxxx",
            "actions": [
                {"type": "payLovelace", "toAddress": "addr_test1qpt0", "lovelace": huge}
            ]
        }),
    )
    .await;
    assert_eq!(status, 200);

    // The same amount submitted as a bare JSON integer literal builds the
    // identical blob: no precision was lost on either path.
    let (_, body_number) = post_json(
        &format!("{base}/cardano/txs/build"),
        &json!({
            "fromAddress": "addr_test1qpfr0mxxx",
            "actions": [
                {"type": "payLovelace", "toAddress": "addr_test1qpt0",
                 "lovelace": huge.parse::<serde_json::Number>().unwrap()}
            ]
        }),
    )
    .await;
    assert_eq!(body["unsignedCbor"], body_number["unsignedCbor"]);
}
