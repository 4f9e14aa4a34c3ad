// SDK configuration
use crate::error::ConfigError;
use serde::Deserialize;
use std::time::Duration;

// Client ids travel in a two byte header field
pub const MAX_CLIENT_ID: u32 = u16::MAX as u32;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SdkConfig {
    pub client_id: u32,
    pub host: String,
    pub port: u16,
    pub request_timeout_ms: u64,
    pub max_connections: u32,
    pub zipped_messaging: bool,
    pub lang: String,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            client_id: 0,
            host: String::new(),
            port: 34323,
            request_timeout_ms: 30000,
            max_connections: 3,
            zipped_messaging: false,
            lang: "en".to_string(),
        }
    }
}

impl SdkConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SdkConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.client_id == 0 || self.client_id > MAX_CLIENT_ID {
            return Err(ConfigError::InvalidClientId(self.client_id));
        }
        if self.host.trim().is_empty() {
            return Err(ConfigError::MissingField("host".to_string()));
        }
        if self.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "port".to_string(),
                reason: "must be non-zero".to_string(),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms".to_string(),
                reason: "must be non-zero".to_string(),
            });
        }
        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_connections".to_string(),
                reason: "at least one connection is required".to_string(),
            });
        }
        Ok(())
    }
}
