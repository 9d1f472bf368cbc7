use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    Local,
    Remote,
}

impl SourceMode {
    pub fn label(self) -> &'static str {
        match self {
            SourceMode::Local => "local",
            SourceMode::Remote => "remote",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub mode: String,
    pub endpoint: String,
    pub timeout_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            mode: "local".to_string(),
            endpoint: "http://localhost:8000/api/v1".to_string(),
            timeout_ms: 5000,
        }
    }
}

impl SourceConfig {
    pub fn to_mode(&self) -> SourceMode {
        match self.mode.to_lowercase().as_str() {
            "remote" | "api" => SourceMode::Remote,
            _ => SourceMode::Local,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    pub default_page_size: usize,
    pub max_page_size: usize,
    pub fixture_seed: u64,
    pub fixture_size: usize,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
            fixture_seed: 42,
            fixture_size: 25,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FeedConfig {
    pub source: SourceConfig,
    pub feed: FeedSettings,
}

impl FeedConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                toml::from_str(&contents)
                    .map_err(|err| format!("failed to parse config: {}", err))?
            } else {
                FeedConfig::default()
            }
        } else {
            FeedConfig::default()
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| format!("failed to create config dir: {}", err))?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| format!("failed to serialize config: {}", err))?;
        std::fs::write(path, payload).map_err(|err| format!("failed to write config: {}", err))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(mode) = env::var("CATALOG_SOURCE") {
            if !mode.trim().is_empty() {
                self.source.mode = mode;
            }
        }
        if let Ok(endpoint) = env::var("PERSONALIZATION_ENDPOINT") {
            if !endpoint.trim().is_empty() {
                self.source.endpoint = endpoint;
            }
        }
        if let Ok(timeout) = env::var("PERSONALIZATION_TIMEOUT_MS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.source.timeout_ms = value;
            }
        }
        if let Ok(page_size) = env::var("FEED_PAGE_SIZE") {
            if let Ok(value) = page_size.parse::<usize>() {
                self.feed.default_page_size = value;
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("FEED_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/feed.toml")))
}
