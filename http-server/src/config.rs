use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    /// Optional database URL. If not provided, defaults to sqlite://todos.sqlite
    pub url: Option<String>,
    /// Maximum number of database connections in the pool
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub connection_timeout: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    /// Listen address for the HTTP server
    pub listen_addr: String,
    /// Port number to listen on
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (pretty, json, compact)
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
    Compact,
}

impl Config {
    /// Load configuration from environment variables and config files
    pub fn from_env() -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        // Start with default configuration
        builder = builder.add_source(File::from_str(
            include_str!("../config/default.toml"),
            FileFormat::Toml,
        ));

        // Add config file if specified
        if let Ok(config_file) = env::var("CONFIG_FILE") {
            builder = builder.add_source(
                File::with_name(&config_file)
                    .required(false)
                    .format(FileFormat::Toml),
            );
        }

        // Add environment variable overrides with TODO_ prefix
        builder = builder.add_source(
            Environment::with_prefix("TODO")
                .separator("_")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        let mut result: Config = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        // Handle standard environment variables (DATABASE_URL, LISTEN_ADDR, LOG_LEVEL)
        Self::apply_standard_env_vars(&mut result);

        Ok(result)
    }

    /// Load configuration from a specific file path
    pub fn from_file(path: &str) -> Result<Self> {
        let builder = ConfigBuilder::builder()
            .add_source(File::with_name(path).format(FileFormat::Toml))
            .add_source(
                Environment::with_prefix("TODO")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder
            .build()
            .context("Failed to build configuration from file")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration from file")
    }

    /// Apply standard environment variables for common deployment patterns
    fn apply_standard_env_vars(config: &mut Config) {
        if let Ok(database_url) = env::var("DATABASE_URL") {
            config.database.url = Some(database_url);
        }

        if let Ok(listen_addr) = env::var("LISTEN_ADDR") {
            config.server.listen_addr = listen_addr;
        }

        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.logging.level = log_level;
        }
    }

    /// Get the database URL with default fallback
    pub fn database_url(&self) -> String {
        match &self.database.url {
            Some(url) => url.clone(),
            None => "sqlite://todos.sqlite".to_string(),
        }
    }

    /// Get the full server listen address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.listen_addr, self.server.port)
    }

    /// Validate the configuration, failing fast at startup on bad values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be non-zero");
        }

        if self.server.listen_addr.is_empty() {
            anyhow::bail!("Listen address must not be empty");
        }

        if self.database.max_connections == 0 {
            anyhow::bail!("Database pool must allow at least one connection");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        Ok(())
    }
}
