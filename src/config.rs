//! Configuration system for the flight lookup service
//!
//! Configuration is a TOML file with three sections: service identity,
//! transport channel selection, and the tool table. A missing file is not an
//! error; `ServiceConfig::default()` yields a runnable single-tool service.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Main service configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceConfig {
    pub service: ServiceSection,
    #[serde(default)]
    pub transport: TransportSection,
    #[serde(default)]
    pub tools: std::collections::HashMap<String, ToolConfig>,
}

/// Service identity section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceSection {
    /// Service identifier (must match [a-zA-Z0-9._-]+)
    pub id: String,
    /// Description of what this service does
    pub description: String,
}

/// Transport section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TransportSection {
    /// Channel the service listens on
    #[serde(default)]
    pub channel: TransportChannel,
}

/// Supported transport channels
///
/// Standard input/output is the only channel this service serves on; the
/// enum keeps the config forward-compatible without inventing channels the
/// service does not have.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportChannel {
    #[default]
    Stdio,
}

/// Tool configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ToolConfig {
    /// Simple form: tool_name = "identifier"
    Simple(String),
    /// Complex form: tool_name = { impl = "identifier", config = { ... } }
    Complex {
        #[serde(rename = "impl")]
        implementation: String,
        #[serde(default)]
        config: std::collections::HashMap<String, serde_json::Value>,
    },
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Invalid service ID format: {0}")]
    InvalidServiceId(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ServiceConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: ServiceConfig = toml::from_str(&content)?;

        validate_service_id(&config.service.id)?;

        Ok(config)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        let mut tools = std::collections::HashMap::new();
        tools.insert(
            "FlightInfoBot".to_string(),
            ToolConfig::Simple("builtin".to_string()),
        );

        Self {
            service: ServiceSection {
                id: "flight-info-bot".to_string(),
                description: "Returns flight information based on city.".to_string(),
            },
            transport: TransportSection::default(),
            tools,
        }
    }
}

/// Validate service ID format
fn validate_service_id(service_id: &str) -> Result<(), ConfigError> {
    let valid_chars = service_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-');

    if service_id.is_empty() || !valid_chars {
        return Err(ConfigError::InvalidServiceId(format!(
            "Service ID '{service_id}' must match pattern [a-zA-Z0-9._-]+"
        )));
    }

    Ok(())
}
