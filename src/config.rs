//! Configuration module for protosearch.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//! - CLI argument overrides (applied by the binary)
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `PS_` and use double underscores
//! to separate nested levels:
//! - `PS_SEARCH__METRIC=euclidean` sets `search.metric`
//! - `PS_SEARCH__TOP_K=5` sets `search.top_k`
//! - `PS_EMBEDDING__DIMENSION=256` sets `embedding.dimension`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::vector::{DEFAULT_HASHING_DIMENSION, SimilarityMetric};

/// Directory holding the settings file, searched for from the current
/// directory upwards.
pub const CONFIG_DIR: &str = ".protosearch";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Global debug mode (enables debug-level logging)
    #[serde(default)]
    pub debug: bool,

    /// Ranking settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Embedding provider settings
    #[serde(default)]
    pub embedding: EmbeddingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SearchConfig {
    /// Similarity metric: "cosine" or "euclidean"
    #[serde(default)]
    pub metric: SimilarityMetric,

    /// Maximum number of results to print (unset = all)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<usize>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EmbeddingConfig {
    /// Provider: "hashing", or "fastembed" when built with that feature
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Output dimension of the hashing provider
    #[serde(default = "default_dimension")]
    pub dimension: usize,

    /// Model cache directory for the fastembed provider
    #[serde(default = "default_model_cache")]
    pub model_cache: PathBuf,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_provider() -> String {
    "hashing".to_string()
}
fn default_dimension() -> usize {
    DEFAULT_HASHING_DIMENSION
}
fn default_model_cache() -> PathBuf {
    PathBuf::from(CONFIG_DIR).join("models")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            debug: false,
            search: SearchConfig::default(),
            embedding: EmbeddingConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            metric: SimilarityMetric::Cosine,
            top_k: None,
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            dimension: default_dimension(),
            model_cache: default_model_cache(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join("settings.toml"));

        Self::load_from(config_path)
    }

    /// Load configuration from a specific file
    ///
    /// A missing file is not an error; defaults and environment still apply.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer in config file if it exists
            .merge(Toml::file(path.as_ref()))
            // Layer in environment variables with PS_ prefix
            // Double underscore separates nested levels; single underscores
            // stay inside field names
            .merge(Env::prefixed("PS_").map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
            .extract()
            .map_err(Box::new)
    }

    /// Find the settings file by looking for the config directory
    /// from the current directory up to root
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        current
            .ancestors()
            .map(|ancestor| ancestor.join(CONFIG_DIR))
            .find(|dir| dir.is_dir())
            .map(|dir| dir.join("settings.toml"))
    }

    /// Create a default settings file with helpful comments
    pub fn init_config_file(force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
        Self::init_config_file_at(PathBuf::from(CONFIG_DIR).join("settings.toml"), force)
    }

    /// Write the commented settings template to `config_path`
    pub fn init_config_file_at(
        config_path: PathBuf,
        force: bool,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = format!(
            r#"# protosearch configuration file

# Version of the configuration schema
version = 1

# Enable debug-level logging on stderr
debug = false

[search]
# Similarity metric: "cosine" (higher is better) or "euclidean" (lower is better)
metric = "cosine"

# Maximum number of results to print; leave unset to print every indexed item
# top_k = 10

[embedding]
# Embedding provider: "hashing" (built in) or "fastembed" (requires the
# `fastembed` cargo feature)
provider = "hashing"

# Output dimension of the hashing provider
dimension = {DEFAULT_HASHING_DIMENSION}

# Model cache directory for the fastembed provider
model_cache = "{CONFIG_DIR}/models"
"#
        );

        std::fs::write(&config_path, template)?;
        Ok(config_path)
    }
}
