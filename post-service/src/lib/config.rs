use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_minutes: i64,
}

// Keeps the signing secret out of startup logs.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub max_concurrent_hashes: usize,
}

impl JwtConfig {
    /// Minimum secret length recommended for HS256.
    pub const MIN_SECRET_BYTES: usize = 32;

    /// Longest accepted token lifetime (one year).
    pub const MAX_EXPIRATION_MINUTES: i64 = 60 * 24 * 365;

    pub fn is_secret_weak(&self) -> bool {
        self.secret.len() < Self::MIN_SECRET_BYTES
    }

    /// Reject token lifetimes that would issue already expired tokens or
    /// overflow the expiry timestamp.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.expiration_minutes <= 0 || self.expiration_minutes > Self::MAX_EXPIRATION_MINUTES
        {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_minutes must be between 1 and {}, got {}",
                Self::MAX_EXPIRATION_MINUTES,
                self.expiration_minutes
            )));
        }

        Ok(())
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.jwt.validate()?;

        Ok(config)
    }
}
