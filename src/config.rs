//! Configuration file support for the Cabrillo checker.
//!
//! Loads settings from `~/.config/cabrillo/config.toml` on Linux
//! (or platform-appropriate location on other OSes).

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::category::{CategoryRule, default_rules};
use crate::parser::ParseOptions;

/// Checker configuration loaded from TOML.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tokens per exchange in QSO lines.
    pub exchange_fields: usize,

    /// Run the category value rules after parsing.
    pub validate_categories: bool,

    /// Treat unknown tags as errors.
    pub strict: bool,

    /// Category value rules. Defaults to the built-in rule set.
    pub category_rules: Vec<CategoryRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exchange_fields: 1,
            validate_categories: false,
            strict: false,
            category_rules: default_rules(),
        }
    }
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but is malformed.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Config::default()),
        }
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid TOML in config file: {}", path.display()))
    }

    /// Returns the path to the config file.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cabrillo/config.toml"))
    }

    /// Validate all configuration settings.
    pub fn validate(&self) -> Result<()> {
        if self.exchange_fields == 0 {
            bail!("exchange_fields must be at least 1");
        }
        for (i, rule) in self.category_rules.iter().enumerate() {
            if rule.field.trim().is_empty() {
                bail!("Invalid category rule [{}]: empty field name", i);
            }
        }
        Ok(())
    }

    /// Parser options derived from this configuration.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::new().with_exchange_fields(self.exchange_fields)
    }
}
