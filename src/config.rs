use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::currency::CurrencyCode;
use crate::format::{FormatOptions, Locale};

pub const DEFAULT_BASE_URL: &str = "https://status.neuralgeneration.com";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

/// Overrides for the number formatter defaults. Every field is optional.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct FormatConfig {
    pub locale: Option<Locale>,
    pub currency: Option<String>,
    pub min_fraction_digits: Option<u32>,
    pub max_fraction_digits: Option<u32>,
    pub fallback: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub api: Option<ApiConfig>,
    /// Currency selected on the rate board.
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub format: Option<FormatConfig>,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api: None,
            currency: default_currency(),
            format: None,
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to built-in
    /// defaults when no file exists there.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "neuralgeneration", "fxw")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn base_url(&self) -> &str {
        self.api.as_ref().map_or(DEFAULT_BASE_URL, |a| &a.base_url)
    }

    pub fn selected_currency(&self) -> Result<CurrencyCode> {
        self.currency
            .parse()
            .with_context(|| format!("Invalid currency in config: {}", self.currency))
    }

    /// Formatter options with any config overrides applied.
    pub fn format_options(&self) -> FormatOptions {
        let defaults = FormatOptions::default();
        let Some(overrides) = &self.format else {
            return defaults;
        };
        FormatOptions {
            locale: overrides.locale.unwrap_or(defaults.locale),
            style: defaults.style,
            currency: overrides.currency.clone().unwrap_or(defaults.currency),
            min_fraction_digits: overrides
                .min_fraction_digits
                .unwrap_or(defaults.min_fraction_digits),
            max_fraction_digits: overrides
                .max_fraction_digits
                .unwrap_or(defaults.max_fraction_digits),
            fallback: overrides.fallback.clone().unwrap_or(defaults.fallback),
        }
    }
}

/// Creates a default configuration file with example content at the default location
pub fn setup() -> Result<()> {
    setup_at_path(AppConfig::default_config_path()?)
}

/// Creates a default configuration file with example content at the specified path
pub fn setup_at_path<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    // Include the example config as a string literal in the binary
    let default_config = include_str!("../docs/example_config.yaml");

    std::fs::write(path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
