// Rust guideline compliant 2026-10-18

//! Configuration management for Coupons.

use crate::lifecycle::DEFAULT_EXPIRING_SOON_DAYS;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// Human-readable table format.
    #[default]
    Table,
    /// Plain text format.
    Plain,
}

/// Configuration for Coupons behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Width, in days, of the expiring-soon window.
    #[serde(default = "default_expiring_soon_days")]
    pub expiring_soon_days: u32,

    /// Maximum accepted receipt image size in bytes.
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,

    /// Default output format for commands.
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Owner used when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

fn default_expiring_soon_days() -> u32 {
    DEFAULT_EXPIRING_SOON_DAYS
}

/// 5 MiB.
fn default_max_image_bytes() -> u64 {
    5 * 1024 * 1024
}

const MAX_EXPIRING_SOON_DAYS: u32 = 365;

impl Default for Config {
    fn default() -> Self {
        Self {
            expiring_soon_days: default_expiring_soon_days(),
            max_image_bytes: default_max_image_bytes(),
            output_format: OutputFormat::default(),
            owner: None,
        }
    }
}

impl Config {
    /// Loads configuration from file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. Configuration file at `.coupons/config.toml`
    /// 3. Environment variables with `COUPONS_` prefix
    ///
    /// # Arguments
    ///
    /// * `coupons_dir` - Path to the `.coupons` directory
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file exists but cannot be read
    /// - Configuration file contains invalid TOML
    /// - Configuration values fail validation
    pub fn load(coupons_dir: &Path) -> Result<Self> {
        let mut config = Self::default();

        let config_path = coupons_dir.join("config.toml");
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            config = toml::from_str(&content)
                .map_err(|e| crate::Error::Validation(format!("Invalid config file: {}", e)))?;
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `COUPONS_EXPIRING_SOON_DAYS` - Expiring-soon window in days
    /// - `COUPONS_MAX_IMAGE_BYTES` - Receipt size limit in bytes
    /// - `COUPONS_OUTPUT_FORMAT` - Output format (json/table/plain)
    /// - `COUPONS_OWNER` - Default owner
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable values are invalid.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("COUPONS_EXPIRING_SOON_DAYS") {
            self.expiring_soon_days = val.parse().map_err(|_| {
                crate::Error::Validation(
                    "COUPONS_EXPIRING_SOON_DAYS must be a non-negative number".to_string(),
                )
            })?;
        }

        if let Ok(val) = std::env::var("COUPONS_MAX_IMAGE_BYTES") {
            self.max_image_bytes = val.parse().map_err(|_| {
                crate::Error::Validation(
                    "COUPONS_MAX_IMAGE_BYTES must be a positive number".to_string(),
                )
            })?;
        }

        if let Ok(val) = std::env::var("COUPONS_OUTPUT_FORMAT") {
            self.output_format = match val.as_str() {
                "json" => OutputFormat::Json,
                "table" => OutputFormat::Table,
                "plain" => OutputFormat::Plain,
                _ => {
                    return Err(crate::Error::Validation(
                        "COUPONS_OUTPUT_FORMAT must be json, table, or plain".to_string(),
                    ))
                }
            };
        }

        if let Ok(val) = std::env::var("COUPONS_OWNER") {
            if !val.trim().is_empty() {
                self.owner = Some(val.trim().to_string());
            }
        }

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - expiring_soon_days exceeds 365
    /// - max_image_bytes is zero
    /// - owner is set but blank
    fn validate(&self) -> Result<()> {
        if self.expiring_soon_days > MAX_EXPIRING_SOON_DAYS {
            return Err(crate::Error::Validation(format!(
                "expiring_soon_days must be at most {}, got {}",
                MAX_EXPIRING_SOON_DAYS, self.expiring_soon_days
            )));
        }

        if self.max_image_bytes == 0 {
            return Err(crate::Error::Validation(
                "max_image_bytes must be greater than 0".to_string(),
            ));
        }

        if self.owner.as_deref().is_some_and(|owner| owner.trim().is_empty()) {
            return Err(crate::Error::Validation(
                "owner cannot be blank".to_string(),
            ));
        }

        Ok(())
    }

    /// Saves the configuration to a TOML file.
    ///
    /// # Arguments
    ///
    /// * `coupons_dir` - Path to the `.coupons` directory
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails.
    pub fn save(&self, coupons_dir: &Path) -> Result<()> {
        let config_path = coupons_dir.join("config.toml");
        let content = toml::to_string_pretty(self).map_err(|e| {
            crate::Error::Validation(format!("Failed to serialize config: {}", e))
        })?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}
