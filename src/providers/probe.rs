//! Bounded-timeout reachability and health probes.

use std::time::Duration;

use serde_json::Value;

use crate::config::schema::ProbeConfig;

/// Issues HTTP GET probes with explicit per-probe deadlines.
#[derive(Clone)]
pub struct Prober {
    client: reqwest::Client,
    ping_timeout: Duration,
    health_timeout: Duration,
}

impl Prober {
    pub fn new(client: reqwest::Client, config: &ProbeConfig) -> Self {
        Self {
            client,
            ping_timeout: Duration::from_millis(config.ping_timeout_ms),
            health_timeout: Duration::from_millis(config.health_timeout_ms),
        }
    }

    /// Plain reachability ping.
    ///
    /// Any non-5xx status counts as reachable: a 4xx means the service is
    /// up, it just didn't like this particular request. Timeouts and
    /// connection errors are absorbed as unreachable.
    pub async fn ping(&self, url: &str) -> bool {
        match self
            .client
            .get(url)
            .timeout(self.ping_timeout)
            .send()
            .await
        {
            Ok(response) => response.status().as_u16() < 500,
            Err(error) => {
                tracing::debug!(url = %url, error = %error, "ping failed");
                false
            }
        }
    }

    /// Dedicated health check.
    ///
    /// Requires a success status; if the body is structured it must assert
    /// the healthy flag, an unstructured 200 is healthy by default.
    pub async fn health(&self, url: &str) -> bool {
        let response = match self
            .client
            .get(url)
            .timeout(self.health_timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => {
                tracing::debug!(url = %url, error = %error, "health check failed");
                return false;
            }
        };

        if !response.status().is_success() {
            tracing::debug!(url = %url, status = %response.status(), "health check non-success");
            return false;
        }

        match response.json::<Value>().await {
            Ok(body) => body
                .get("is_healthy")
                .and_then(Value::as_bool)
                .unwrap_or(true),
            Err(_) => true,
        }
    }

    /// The shared outbound HTTP client.
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}
