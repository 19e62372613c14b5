//! Configuration management for the registry initializer
//!
//! Supports loading configuration from:
//! - Default values (the fixed container contract: `/schemas`, `.avsc`, 60 probes)
//! - Config file (schema-init.toml)
//! - Environment variables (SCHEMA_INIT__*)
//! - `KAFKA_SCHEMA_REGISTRY_URL`, which always wins for the registry address
//!
//! ## Example config file (schema-init.toml):
//! ```toml
//! [registry]
//! url = "http://localhost:8081"
//! probe_attempts = 30
//! request_timeout_secs = 20
//!
//! [schemas]
//! dir = "./schemas"
//! extension = "avsc"
//!
//! [output]
//! color = false
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the registry base address
pub const REGISTRY_URL_ENV: &str = "KAFKA_SCHEMA_REGISTRY_URL";

/// Registry address used when nothing else is configured
pub const DEFAULT_REGISTRY_URL: &str = "http://schema-registry:8081";

/// Main configuration for an initialization run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InitConfig {
    /// Registry connection settings
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Schema source settings
    #[serde(default)]
    pub schemas: SchemasConfig,

    /// Console output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Base address of the schema registry
    #[serde(default = "default_registry_url")]
    pub url: String,

    /// Maximum number of readiness probes
    #[serde(default = "default_probe_attempts")]
    pub probe_attempts: u32,

    /// Pause between readiness probes, in milliseconds
    #[serde(default = "default_probe_interval_ms")]
    pub probe_interval_ms: u64,

    /// Timeout of a single readiness probe, in seconds
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,

    /// Timeout of a single registration request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Appended to the file stem to form the registry subject
    #[serde(default = "default_subject_suffix")]
    pub subject_suffix: String,

    /// Honour HTTP(S)_PROXY from the environment
    #[serde(default = "default_true")]
    pub use_proxy: bool,
}

/// Schema source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemasConfig {
    /// Directory scanned for schema files (not recursive)
    #[serde(default = "default_schemas_dir")]
    pub dir: PathBuf,

    /// File extension to register, without the leading dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

/// Console output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Emit ANSI color codes
    #[serde(default = "default_true")]
    pub color: bool,
}

// Default value functions
fn default_registry_url() -> String {
    DEFAULT_REGISTRY_URL.to_string()
}

fn default_probe_attempts() -> u32 {
    60
}

fn default_probe_interval_ms() -> u64 {
    1000
}

fn default_probe_timeout_secs() -> u64 {
    5
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_subject_suffix() -> String {
    "-value".to_string()
}

fn default_schemas_dir() -> PathBuf {
    PathBuf::from("/schemas")
}

fn default_extension() -> String {
    "avsc".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: default_registry_url(),
            probe_attempts: default_probe_attempts(),
            probe_interval_ms: default_probe_interval_ms(),
            probe_timeout_secs: default_probe_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            subject_suffix: default_subject_suffix(),
            use_proxy: true,
        }
    }
}

impl Default for SchemasConfig {
    fn default() -> Self {
        Self {
            dir: default_schemas_dir(),
            extension: default_extension(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

impl RegistryConfig {
    pub fn probe_interval(&self) -> Duration {
        Duration::from_millis(self.probe_interval_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl SchemasConfig {
    /// The extension with a leading dot, as matched against file names
    pub fn suffix(&self) -> String {
        format!(".{}", self.extension.trim_start_matches('.'))
    }
}

impl InitConfig {
    /// Load configuration from a specific file, honouring `KAFKA_SCHEMA_REGISTRY_URL`
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        Self::build(config_path, std::env::var(REGISTRY_URL_ENV).ok())
    }

    /// Layer every source, with `registry_url` (if any) overriding all of them
    pub fn build(config_path: Option<&str>, registry_url: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = [
            "schema-init.toml",
            ".schema-init.toml",
            "config/schema-init.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "familiar", "schema-init") {
            let xdg_config = config_dir.config_dir().join("schema-init.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Load from environment variables (SCHEMA_INIT__*)
        builder = builder.add_source(
            Environment::with_prefix("SCHEMA_INIT")
                .separator("__")
                .try_parsing(true),
        );

        builder = builder.set_override_option("registry.url", registry_url)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Registry base address without trailing slashes
    pub fn registry_url(&self) -> &str {
        self.registry.url.trim_end_matches('/')
    }
}
