//! Trip planner configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main trip planner configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Planning service configuration
    pub planner: PlannerConfig,

    /// Static map configuration
    pub map: MapConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Checks that the map-rendering API key is present in the environment.
    /// Optional fail-fast for callers that want it; the session itself never
    /// pre-validates the credential - a missing key simply fails at the
    /// rendering layer.
    pub fn validate(&self) -> Result<()> {
        if std::env::var(&self.map.api_key_env).is_err() {
            return Err(eyre::eyre!(
                "Map API key not found. Set the {} environment variable.",
                self.map.api_key_env
            ));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .tripplanner.yml
        let local_config = PathBuf::from(".tripplanner.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/tripplanner/tripplanner.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("tripplanner").join("tripplanner.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Planning service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Base URL of the planning service
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8733/planning".to_string(),
            timeout_ms: 30_000,
        }
    }
}

/// Static map configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Environment variable containing the rendering API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// Default zoom level; the UI may override it per session
    pub zoom: u8,

    /// Output width in pixels
    pub width: u32,

    /// Output height in pixels
    pub height: u32,

    /// Locale tag sent with every rendering request
    pub language: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GOOGLE_API_KEY".to_string(),
            zoom: 8,
            width: 400,
            height: 400,
            language: "he-IL".to_string(),
        }
    }
}

/// Map-rendering credential, resolved once at startup
///
/// Held by the renderer and passed along explicitly - never stored as
/// process-global mutable state.
#[derive(Debug, Clone)]
pub struct MapCredentials {
    api_key: String,
}

impl MapCredentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Read the credential from the environment variable named in config
    pub fn from_env(config: &MapConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .context(format!("{} environment variable not set", config.api_key_env))?;
        Ok(Self { api_key })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}
