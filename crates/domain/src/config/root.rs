use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::zones::ZoneConfig;

/// Main configuration structure for Zonewire
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listen address, port and transport options
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Zones served authoritatively
    #[serde(default)]
    pub zones: Vec<ZoneConfig>,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. zonewire.toml in current directory
    /// 3. /etc/zonewire/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if overrides.multicast {
            self.server.multicast = true;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        self.server
            .listen_address()
            .map_err(ConfigError::Validation)?;

        let mut origins = HashSet::new();
        for zone in &self.zones {
            let options = zone.parse_options().map_err(ConfigError::Validation)?;
            if let Some(origin) = options.origin {
                if !origins.insert(origin.clone()) {
                    return Err(ConfigError::Validation(format!(
                        "Zone origin {} is configured more than once",
                        origin
                    )));
                }
            }
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new("zonewire.toml").exists() {
            Some("zonewire.toml".to_string())
        } else if std::path::Path::new("/etc/zonewire/config.toml").exists() {
            Some("/etc/zonewire/config.toml".to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
    pub multicast: bool,
}
