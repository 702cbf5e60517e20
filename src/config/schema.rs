//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the transaction gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Backend provider endpoints.
    pub providers: ProviderConfig,

    /// Reachability probe settings.
    pub probes: ProbeConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3001").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3001".to_string(),
        }
    }
}

/// Backend provider endpoints.
///
/// The dual-indexer pair (Ogmios + Kupo) is only usable when both halves
/// respond; the Dolos REST service stands alone as the fallback. The gRPC
/// endpoint is probed for reporting only and never participates in the
/// readiness formula.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Ogmios chain-query endpoint.
    pub ogmios_url: String,

    /// Kupo chain-index endpoint.
    pub kupo_url: String,

    /// Dolos gRPC endpoint (reported, best-effort only).
    pub dolos_grpc_url: String,

    /// Dolos REST endpoint (Blockfrost-style API).
    pub dolos_rest_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            ogmios_url: "http://localhost:1337".to_string(),
            kupo_url: "http://localhost:1442".to_string(),
            dolos_grpc_url: "http://localhost:50051".to_string(),
            dolos_rest_url: "http://localhost:4000".to_string(),
        }
    }
}

impl ProviderConfig {
    /// Apply per-endpoint environment overrides.
    ///
    /// Empty values are ignored, matching the behavior of an unset variable.
    pub fn apply_env_overrides(&mut self) {
        for (var, slot) in [
            ("OGMIOS_URL", &mut self.ogmios_url),
            ("KUPO_URL", &mut self.kupo_url),
            ("DOLOS_GRPC_URL", &mut self.dolos_grpc_url),
            ("DOLOS_REST_URL", &mut self.dolos_rest_url),
        ] {
            if let Ok(value) = std::env::var(var) {
                if !value.is_empty() {
                    *slot = value;
                }
            }
        }
    }

    /// The dedicated health endpoint of the Dolos REST service.
    pub fn dolos_rest_health_url(&self) -> String {
        format!("{}/health", self.dolos_rest_url.trim_end_matches('/'))
    }
}

/// Reachability probe settings.
///
/// Pings answer "is the process up at all" and get the short deadline;
/// health checks read a response body and get a slightly longer one.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Deadline for a plain reachability ping, in milliseconds.
    pub ping_timeout_ms: u64,

    /// Deadline for a full health check, in milliseconds.
    pub health_timeout_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            ping_timeout_ms: 1500,
            health_timeout_ms: 2000,
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default log filter directive (overridden by RUST_LOG).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "cardano_gateway=info,tower_http=warn".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let config = GatewayConfig::default();
        assert_eq!(config.providers.ogmios_url, "http://localhost:1337");
        assert_eq!(config.providers.kupo_url, "http://localhost:1442");
        assert_eq!(config.providers.dolos_rest_url, "http://localhost:4000");
        assert_eq!(config.probes.ping_timeout_ms, 1500);
        assert_eq!(config.probes.health_timeout_ms, 2000);
    }

    #[test]
    fn test_health_url_strips_trailing_slash() {
        let providers = ProviderConfig {
            dolos_rest_url: "http://localhost:4000/".to_string(),
            ..ProviderConfig::default()
        };
        assert_eq!(
            providers.dolos_rest_health_url(),
            "http://localhost:4000/health"
        );
    }

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: GatewayConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:3001");
        assert_eq!(config.timeouts.request_secs, 30);
    }
}
