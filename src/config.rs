use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::accumulator::DuplicatePolicy;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_streaming")]
    pub streaming: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            streaming: default_streaming(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}
fn default_connect_timeout_secs() -> u64 {
    10
}
fn default_streaming() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_cache_path")]
    pub path: PathBuf,
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
            enabled: default_cache_enabled(),
        }
    }
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("./data/pubscout.sqlite")
}
fn default_cache_enabled() -> bool {
    true
}

/// Query defaults applied when the corresponding flag is omitted.
#[derive(Debug, Deserialize, Clone)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            origin: None,
            max_results: default_max_results(),
        }
    }
}

fn default_max_results() -> u32 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_duplicate_policy")]
    pub duplicate_policy: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: default_duplicate_policy(),
        }
    }
}

fn default_duplicate_policy() -> String {
    "append".to_string()
}

impl SearchConfig {
    pub fn duplicate_policy(&self) -> Result<DuplicatePolicy> {
        match self.duplicate_policy.as_str() {
            "append" => Ok(DuplicatePolicy::Append),
            "replace" => Ok(DuplicatePolicy::Replace),
            other => anyhow::bail!(
                "Unknown duplicate_policy: '{}'. Must be append or replace.",
                other
            ),
        }
    }
}

/// Load configuration, falling back to built-in defaults when the file at
/// the default location does not exist. An explicitly given path must
/// exist.
pub fn load_config(path: &Path, explicit: bool) -> Result<Config> {
    if !path.exists() && !explicit {
        let config = Config::default();
        validate(&config)?;
        return Ok(config);
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.service.base_url.trim().is_empty() {
        anyhow::bail!("service.base_url must not be empty");
    }
    if config.service.connect_timeout_secs == 0 {
        anyhow::bail!("service.connect_timeout_secs must be > 0");
    }
    if !(1..=100).contains(&config.defaults.max_results) {
        anyhow::bail!("defaults.max_results must be in [1, 100]");
    }
    config.search.duplicate_policy()?;
    Ok(())
}
