//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
///
/// Environment overrides for provider endpoints are applied after parsing,
/// so `OGMIOS_URL` and friends win over file contents.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let mut config: GatewayConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;
    config.providers.apply_env_overrides();

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build a configuration when no file was given: defaults + environment.
pub fn load_from_env() -> Result<GatewayConfig, ConfigError> {
    let mut config = GatewayConfig::default();
    config.providers.apply_env_overrides();

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_round_trip() {
        let toml = r#"
            [listener]
            bind_address = "127.0.0.1:9099"

            [providers]
            kupo_url = "http://kupo.internal:1442"
        "#;
        let dir = std::env::temp_dir().join("gateway-config-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("gateway.toml");
        fs::write(&path, toml).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9099");
        assert_eq!(config.providers.kupo_url, "http://kupo.internal:1442");
        // Unspecified sections keep their defaults.
        assert_eq!(config.providers.ogmios_url, "http://localhost:1337");
    }

    #[test]
    fn test_invalid_file_reports_validation() {
        let toml = r#"
            [listener]
            bind_address = "nope"
        "#;
        let dir = std::env::temp_dir().join("gateway-config-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("gateway-invalid.toml");
        fs::write(&path, toml).unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
