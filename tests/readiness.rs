//! Readiness resolution through the public HTTP surface.

use serde_json::{json, Value};

mod common;
use common::{base_config, http_url, spawn_gateway, start_mock_backend, start_routing_backend};

async fn get_json(url: &str) -> (u16, Value) {
    let response = reqwest::Client::new().get(url).send().await.unwrap();
    let status = response.status().as_u16();
    let body = response.json::<Value>().await.unwrap();
    (status, body)
}

#[tokio::test]
async fn test_ready_when_both_indexers_reachable() {
    let ogmios = start_mock_backend(200, "{}").await;
    let kupo = start_mock_backend(200, "{}").await;

    let mut config = base_config();
    config.providers.ogmios_url = http_url(ogmios);
    config.providers.kupo_url = http_url(kupo);
    let base = spawn_gateway(config).await;

    let (status, body) = get_json(&format!("{base}/cardano/status")).await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["ready"], true);
    assert_eq!(body["ogmiosReachable"], true);
    assert_eq!(body["kupoReachable"], true);
    assert_eq!(body["dolosRestHealthy"], false);
    assert_eq!(body["chosenProvider"], "kupmios");
}

#[tokio::test]
async fn test_one_indexer_is_not_enough() {
    let ogmios = start_mock_backend(200, "{}").await;

    let mut config = base_config();
    config.providers.ogmios_url = http_url(ogmios);
    let base = spawn_gateway(config).await;

    let (status, body) = get_json(&format!("{base}/cardano/readiness")).await;
    assert_eq!(status, 503);
    assert_eq!(body["success"], false);
    assert_eq!(body["ready"], false);
}

#[tokio::test]
async fn test_fallback_health_alone_makes_ready() {
    let dolos = start_routing_backend(|path| {
        if path.starts_with("/health") {
            (200, json!({"is_healthy": true}).to_string())
        } else {
            (200, "{}".to_string())
        }
    })
    .await;

    let mut config = base_config();
    config.providers.dolos_rest_url = http_url(dolos);
    let base = spawn_gateway(config).await;

    let (status, body) = get_json(&format!("{base}/cardano/readiness")).await;
    assert_eq!(status, 200);
    assert_eq!(body["ready"], true);

    let (_, body) = get_json(&format!("{base}/cardano/status")).await;
    assert_eq!(body["chosenProvider"], "dolosRest");
    assert_eq!(body["ogmiosReachable"], false);
}

#[tokio::test]
async fn test_all_probes_down_reports_not_ready() {
    let base = spawn_gateway(base_config()).await;

    let (status, body) = get_json(&format!("{base}/cardano/readiness")).await;
    assert_eq!(status, 503);
    assert_eq!(body["ready"], false);

    let (status, body) = get_json(&format!("{base}/cardano/status")).await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], false);
    assert_eq!(body["chosenProvider"], Value::Null);
}

#[tokio::test]
async fn test_4xx_counts_as_reachable_for_pings() {
    // A 404 means the service is up, it just didn't like the request.
    let ogmios = start_mock_backend(404, "not found").await;
    let kupo = start_mock_backend(429, "slow down").await;

    let mut config = base_config();
    config.providers.ogmios_url = http_url(ogmios);
    config.providers.kupo_url = http_url(kupo);
    let base = spawn_gateway(config).await;

    let (_, body) = get_json(&format!("{base}/cardano/status")).await;
    assert_eq!(body["ready"], true);
    assert_eq!(body["ogmiosReachable"], true);
    assert_eq!(body["kupoReachable"], true);
}

#[tokio::test]
async fn test_5xx_is_unreachable() {
    let ogmios = start_mock_backend(503, "down").await;
    let kupo = start_mock_backend(200, "{}").await;

    let mut config = base_config();
    config.providers.ogmios_url = http_url(ogmios);
    config.providers.kupo_url = http_url(kupo);
    let base = spawn_gateway(config).await;

    let (_, body) = get_json(&format!("{base}/cardano/status")).await;
    assert_eq!(body["ready"], false);
    assert_eq!(body["ogmiosReachable"], false);
    assert_eq!(body["kupoReachable"], true);
}

#[tokio::test]
async fn test_health_requires_the_healthy_flag() {
    // A reachable fallback whose health document denies being healthy.
    let dolos = start_routing_backend(|path| {
        if path.starts_with("/health") {
            (200, json!({"is_healthy": false}).to_string())
        } else {
            (200, "{}".to_string())
        }
    })
    .await;

    let mut config = base_config();
    config.providers.dolos_rest_url = http_url(dolos);
    let base = spawn_gateway(config).await;

    let (status, body) = get_json(&format!("{base}/cardano/readiness")).await;
    assert_eq!(status, 503);
    assert_eq!(body["ready"], false);

    let (_, body) = get_json(&format!("{base}/cardano/status")).await;
    assert_eq!(body["dolosRestReachable"], true);
    assert_eq!(body["dolosRestHealthy"], false);
}

#[tokio::test]
async fn test_unstructured_health_body_is_healthy_by_default() {
    let dolos = start_mock_backend(200, "ok").await;

    let mut config = base_config();
    config.providers.dolos_rest_url = http_url(dolos);
    let base = spawn_gateway(config).await;

    let (status, body) = get_json(&format!("{base}/cardano/readiness")).await;
    assert_eq!(status, 200);
    assert_eq!(body["ready"], true);
}

#[tokio::test]
async fn test_dolos_status_reports_fallback_family() {
    let dolos = start_routing_backend(|path| {
        if path.starts_with("/health") {
            (200, json!({"is_healthy": true}).to_string())
        } else {
            (200, "{}".to_string())
        }
    })
    .await;

    let mut config = base_config();
    config.providers.dolos_rest_url = http_url(dolos);
    let base = spawn_gateway(config).await;

    let (status, body) = get_json(&format!("{base}/cardano/dolos-status")).await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["ready"], true);
    assert_eq!(body["dolosGrpcReachable"], false);
    assert_eq!(body["dolosRestReachable"], true);
    assert_eq!(body["dolosRestHealthy"], true);
}

#[tokio::test]
async fn test_dolos_health_and_version_proxies() {
    let dolos = start_routing_backend(|path| {
        if path.starts_with("/health") {
            (200, json!({"is_healthy": true}).to_string())
        } else {
            (
                200,
                json!({"url": "[::]:3000", "version": "1.0.0-beta.x", "revision": "abcdef"})
                    .to_string(),
            )
        }
    })
    .await;

    let mut config = base_config();
    config.providers.dolos_rest_url = http_url(dolos);
    let base = spawn_gateway(config).await;

    let (status, body) = get_json(&format!("{base}/cardano/dolos/health")).await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!({"is_healthy": true}));

    let (status, body) = get_json(&format!("{base}/cardano/dolos/version")).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["version"], "1.0.0-beta.x");
}

#[tokio::test]
async fn test_dolos_proxy_failure_maps_to_bad_gateway() {
    let base = spawn_gateway(base_config()).await;

    let (status, body) = get_json(&format!("{base}/cardano/dolos/health")).await;
    assert_eq!(status, 502);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_process_liveness_is_provider_independent() {
    let base = spawn_gateway(base_config()).await;

    let (status, body) = get_json(&format!("{base}/health")).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
}
