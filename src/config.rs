use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound for a whole form submission, files included
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding every stored file
    #[serde(default = "default_local_path")]
    pub local_path: String,
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_local_path() -> String {
    "data/uploads".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            local_path: default_local_path(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables
    pub fn load() -> anyhow::Result<Self> {
        let mut config = Self::load_from_file()?;
        config.apply_overrides(|key| env::var(key).ok());
        config.ensure_directories()?;
        Ok(config)
    }

    /// Load configuration from the first config file found
    fn load_from_file() -> anyhow::Result<Self> {
        let config_paths = [
            "itembox.toml",
            "config.toml",
            "data/itembox.toml",
            "data/config.toml",
        ];

        for path in config_paths {
            if Path::new(path).exists() {
                let content = fs::read_to_string(path)?;
                let config: Config = toml::from_str(&content)?;
                tracing::info!("Loaded configuration from {}", path);
                return Ok(config);
            }
        }

        tracing::info!("No configuration file found, using defaults");
        Ok(Config::default())
    }

    /// Apply overrides named `ITEMBOX_CONF_<SECTION>_<KEY>`
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Server overrides
        if let Some(val) = lookup("ITEMBOX_CONF_SERVER_HOST") {
            self.server.host = val;
        }
        if let Some(val) = lookup("ITEMBOX_CONF_SERVER_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("ITEMBOX_CONF_SERVER_MAX_UPLOAD_BYTES") {
            if let Ok(bytes) = val.parse() {
                self.server.max_upload_bytes = bytes;
            }
        }

        // Storage overrides
        if let Some(val) = lookup("ITEMBOX_CONF_STORAGE_LOCAL_PATH") {
            if !val.trim().is_empty() {
                self.storage.local_path = val;
            }
        }
    }

    /// Ensure the storage directory exists
    fn ensure_directories(&self) -> anyhow::Result<()> {
        fs::create_dir_all(&self.storage.local_path)?;
        Ok(())
    }
}
