//! CLI configuration.

use anyhow::{Context, Result};
use apex_storefront::LatencyConfig;
use serde::{Deserialize, Serialize};

/// Config file names searched for, nearest directory first.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["apex.toml", ".apex.toml", "apex.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Local store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Simulated service latency.
    #[serde(default)]
    pub latency: LatencyConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }
}

/// Where cart and session records are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for the file backend, relative to the working directory.
    #[serde(default = "default_storage_dir")]
    pub dir: String,

    #[serde(default)]
    pub backend: StorageBackend,
}

fn default_storage_dir() -> String {
    ".apex".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            backend: StorageBackend::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per key.
    #[default]
    File,
    /// Nothing survives the process.
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::File => "file",
            StorageBackend::Memory => "memory",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `plain` or `json`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "plain".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Generate a default apex.toml config file.
pub fn generate_default_config() -> String {
    r#"# Apex storefront configuration

[storage]
# Cart and trade session records live here.
dir = ".apex"
# "file" or "memory"
backend = "file"

[latency]
# Simulated service round trips, in milliseconds.
vrm_lookup_ms = 800
parts_lookup_ms = 500
login_ms = 800
checkout_ms = 2000

[logging]
# Overridden by RUST_LOG.
level = "warn"
# "plain" or "json"
format = "plain"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_matches_defaults() {
        let parsed: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(parsed, CliConfig::default());
    }

    #[test]
    fn test_sections_default_independently() {
        let parsed: CliConfig = toml::from_str(
            r#"
[storage]
backend = "memory"

[latency]
checkout_ms = 0
"#,
        )
        .unwrap();

        assert_eq!(parsed.storage.backend, StorageBackend::Memory);
        assert_eq!(parsed.storage.dir, ".apex");
        assert_eq!(parsed.latency.checkout_ms, 0);
        assert_eq!(parsed.latency.vrm_lookup_ms, 800);
        assert_eq!(parsed.logging.level, "warn");
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apex.json");
        let path = path.to_str().unwrap();

        let mut config = CliConfig::default();
        config.logging.format = "json".to_string();
        config.latency = LatencyConfig::zero();
        config.save(path).unwrap();

        assert_eq!(CliConfig::load(path).unwrap(), config);
    }

    #[test]
    fn test_load_rejects_bad_backend() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apex.toml");
        std::fs::write(&path, "[storage]\nbackend = \"redis\"\n").unwrap();

        assert!(CliConfig::load(path.to_str().unwrap()).is_err());
    }
}
