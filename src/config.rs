use crate::i18n::Locale;
use crate::model::export_row::MissingRelatedPolicy;
use crate::model::view::Breakpoints;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "COMMENTS_TUI_CONFIG";

const DEFAULT_PER_PAGE: usize = 6;

fn default_per_page() -> usize {
    DEFAULT_PER_PAGE
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `comments.json` and `posts.json`
    pub data_dir: String,
    /// Where exported CSV files are written
    pub download_dir: String,
    #[serde(default = "default_per_page")]
    pub per_page: usize,
    #[serde(default)]
    pub breakpoints: Breakpoints,
    #[serde(default)]
    pub locale: Locale,
    /// Behaviour when an exported comment references an unknown post
    #[serde(default)]
    pub missing_related: MissingRelatedPolicy,
}

impl Default for Config {
    fn default() -> Self {
        let download_dir = env::var("HOME")
            .map(|home| PathBuf::from(home).join("Downloads"))
            .unwrap_or_else(|_| PathBuf::from("."));

        Self {
            data_dir: "data".to_string(),
            download_dir: download_dir.to_string_lossy().to_string(),
            per_page: DEFAULT_PER_PAGE,
            breakpoints: Breakpoints::default(),
            locale: Locale::default(),
            missing_related: MissingRelatedPolicy::default(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".comments-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Directory for log files
    pub fn log_dir() -> PathBuf {
        Self::config_dir()
            .map(|dir| dir.join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        Self::from_json(&contents)
    }

    /// Load the saved config, falling back to defaults
    ///
    /// On first run the defaults are written out so they can be edited. A
    /// malformed file is left alone.
    pub fn load_or_default() -> Config {
        if let Some(config) = Self::load() {
            return config;
        }

        let config = Config::default();
        match Self::config_path() {
            Some(path) if !path.exists() => {
                if let Err(e) = config.save() {
                    warn!(error = %e, "could not write default config");
                }
            }
            Some(path) => warn!(path = %path.display(), "ignoring malformed config"),
            None => {}
        }
        config
    }

    fn from_json(contents: &str) -> Option<Config> {
        serde_json::from_str::<Config>(contents)
            .ok()
            .map(Config::validated)
    }

    /// Replace values the list cannot work with
    fn validated(mut self) -> Self {
        if self.per_page == 0 {
            warn!("per_page must be positive, using {}", DEFAULT_PER_PAGE);
            self.per_page = DEFAULT_PER_PAGE;
        }
        if self.breakpoints.large < self.breakpoints.medium {
            self.breakpoints.large = self.breakpoints.medium;
        }
        self
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        if let Some(parent) = config_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }
}
