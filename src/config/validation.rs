//! Configuration validation.
//!
//! Semantic checks on top of serde's syntactic ones. Returns all validation
//! errors, not just the first, so a broken config can be fixed in one pass.

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic configuration error.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Listener bind address is not a valid socket address.
    #[error("listener.bind_address '{0}' is not a valid socket address")]
    BindAddress(String),

    /// A provider endpoint is not a valid http(s) URL.
    #[error("providers.{field} '{value}' is not a valid http(s) URL")]
    EndpointUrl { field: &'static str, value: String },

    /// A timeout was configured as zero.
    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

fn check_endpoint(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    let valid = Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false);
    if !valid {
        errors.push(ValidationError::EndpointUrl {
            field,
            value: value.to_string(),
        });
    }
}

/// Validate a configuration, collecting every semantic error.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config
        .listener
        .bind_address
        .parse::<std::net::SocketAddr>()
        .is_err()
    {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    check_endpoint("ogmios_url", &config.providers.ogmios_url, &mut errors);
    check_endpoint("kupo_url", &config.providers.kupo_url, &mut errors);
    check_endpoint(
        "dolos_grpc_url",
        &config.providers.dolos_grpc_url,
        &mut errors,
    );
    check_endpoint(
        "dolos_rest_url",
        &config.providers.dolos_rest_url,
        &mut errors,
    );

    if config.probes.ping_timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout("probes.ping_timeout_ms"));
    }
    if config.probes.health_timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout("probes.health_timeout_ms"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
