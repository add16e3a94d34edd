use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::account::service::SignupSettings;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub signup: SignupConfig,
    pub frontend: FrontendConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SignupConfig {
    #[serde(default = "default_role_code")]
    pub default_role_code: String,
    #[serde(default = "default_notification_timeout_secs")]
    pub notification_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FrontendConfig {
    pub url: String,
}

fn default_max_connections() -> u32 {
    25
}

fn default_role_code() -> String {
    crate::role::models::DEFAULT_ROLE_CODE.to_string()
}

fn default_notification_timeout_secs() -> u64 {
    10
}

impl Default for SignupConfig {
    fn default() -> Self {
        Self {
            default_role_code: default_role_code(),
            notification_timeout_secs: default_notification_timeout_secs(),
        }
    }
}

impl SignupConfig {
    pub fn settings(&self) -> SignupSettings {
        SignupSettings {
            default_role_code: self.default_role_code.clone(),
            notification_timeout: Duration::from_secs(self.notification_timeout_secs),
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, FRONTEND__URL, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=... overrides database.url
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}
