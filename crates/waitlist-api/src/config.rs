//! Configuration for the waitlist service.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Record store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Welcome email configuration
    #[serde(default)]
    pub notifier: NotifierConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Store backend: "rest" or "memory"
    #[serde(default = "default_store_backend")]
    pub backend: String,

    /// Base URL of the REST record store
    #[serde(default = "default_store_url")]
    pub url: String,

    /// API key for the record store
    #[serde(default)]
    pub api_key: String,

    /// Table holding signup records
    #[serde(default = "default_store_table")]
    pub table: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotifierConfig {
    /// Enable welcome email dispatch (if false, signups are silent)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Email delivery API URL
    #[serde(default = "default_notifier_url")]
    pub api_url: String,

    /// Email delivery API key
    #[serde(default)]
    pub api_key: String,

    /// Sender address, e.g. "Waitlist Team <team@example.com>"
    #[serde(default = "default_notifier_from")]
    pub from: String,

    /// Welcome email subject line
    #[serde(default = "default_notifier_subject")]
    pub subject: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default implementations
impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
            url: default_store_url(),
            api_key: String::new(),
            table: default_store_table(),
        }
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_url: default_notifier_url(),
            api_key: String::new(),
            from: default_notifier_from(),
            subject: default_notifier_subject(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_store_backend() -> String {
    "rest".into()
}

fn default_store_url() -> String {
    "http://localhost:54321".into()
}

fn default_store_table() -> String {
    "waitlist".into()
}

fn default_true() -> bool {
    true
}

fn default_notifier_url() -> String {
    "https://api.resend.com".into()
}

fn default_notifier_from() -> String {
    "Waitlist Team <team@example.com>".into()
}

fn default_notifier_subject() -> String {
    "Welcome to the waitlist".into()
}

fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
