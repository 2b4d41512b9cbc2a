//! # CLI Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority, applied in main)             │
//! │     --locale en  --discount new                                        │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     VITRINE_LOCALE=en  VITRINE_DISCOUNT=percentage:1500                │
//! │     VITRINE_LOG=debug  VITRINE_OUTPUT=json                             │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <path>, or the platform config dir:                       │
//! │     ~/.config/vitrine/config.toml (Linux)                              │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     pt notices, new discount, warn logging, text output                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [notices]
//! locale = "pt"          # pt | en
//!
//! [pricing]
//! discount = "new"       # "default" | "new" | { percentage = 1500 }
//!
//! [logging]
//! filter = "vitrine_core=debug"
//!
//! [output]
//! format = "text"        # text | json
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use vitrine_core::{DiscountPolicy, Locale, MAX_DISCOUNT_BPS};

use crate::error::{CliError, CliResult};

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeSettings {
    #[serde(default)]
    pub locale: Locale,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Strategy installed after the baseline in the discount script.
    #[serde(default = "default_discount")]
    pub discount: DiscountPolicy,
}

fn default_discount() -> DiscountPolicy {
    DiscountPolicy::New
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            discount: default_discount(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

/// Filter used until config is loaded, and when none is configured.
pub const DEFAULT_LOG_FILTER: &str = "warn";

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// One notice per line.
    #[default]
    Text,
    /// Pretty-printed scenario reports.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "plain" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::InvalidConfig(format!(
                "Unknown output format: '{}'. Valid options: text, json",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
}

// =============================================================================
// Main Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub notices: NoticeSettings,

    #[serde(default)]
    pub pricing: PricingSettings,

    #[serde(default)]
    pub logging: LoggingSettings,

    #[serde(default)]
    pub output: OutputSettings,
}

impl CliConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// file at the default location is not.
    ///
    /// The result is not validated. Command-line flags still apply on top,
    /// so callers run [`CliConfig::validate`] after merging them.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// [`CliConfig::load`] with an explicit environment lookup.
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> CliResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        match config_path {
            Some(path) => {
                info!(?path, "Loading config from file");
                config = Self::from_toml(&std::fs::read_to_string(&path)?)?;
            }
            None => {
                if let Some(path) = Self::default_config_path().filter(|p| p.exists()) {
                    info!(?path, "Loading config from file");
                    config = Self::from_toml(&std::fs::read_to_string(&path)?)?;
                } else {
                    debug!("No config file found, using defaults");
                }
            }
        }

        config.apply_env_overrides(lookup);

        Ok(config)
    }

    /// Parses a config file's contents.
    pub fn from_toml(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        if let DiscountPolicy::Percentage(bps) = self.pricing.discount {
            if bps > MAX_DISCOUNT_BPS {
                return Err(CliError::InvalidConfig(format!(
                    "percentage discount must be at most {} bps, got {}",
                    MAX_DISCOUNT_BPS, bps
                )));
            }
        }

        if self.logging.filter.trim().is_empty() {
            return Err(CliError::InvalidConfig(
                "logging.filter must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies overrides from `lookup`, normally the process environment.
    ///
    /// Unparseable values are logged and skipped.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(locale) = lookup("VITRINE_LOCALE") {
            match locale.parse::<Locale>() {
                Ok(parsed) => {
                    debug!(%locale, "Overriding locale from environment");
                    self.notices.locale = parsed;
                }
                Err(e) => warn!(%locale, error = %e, "Ignoring VITRINE_LOCALE"),
            }
        }

        if let Some(discount) = lookup("VITRINE_DISCOUNT") {
            match discount.parse::<DiscountPolicy>() {
                Ok(parsed) => {
                    debug!(%discount, "Overriding discount policy from environment");
                    self.pricing.discount = parsed;
                }
                Err(e) => warn!(%discount, error = %e, "Ignoring VITRINE_DISCOUNT"),
            }
        }

        if let Some(filter) = lookup("VITRINE_LOG") {
            self.logging.filter = filter;
        }

        if let Some(format) = lookup("VITRINE_OUTPUT") {
            match format.parse::<OutputFormat>() {
                Ok(parsed) => self.output.format = parsed,
                Err(e) => warn!(%format, error = %e, "Ignoring VITRINE_OUTPUT"),
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "vitrine", "vitrine")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.notices.locale, Locale::Portuguese);
        assert_eq!(config.pricing.discount, DiscountPolicy::New);
        assert_eq!(config.logging.filter, "warn");
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_parsing() {
        let config = CliConfig::from_toml(
            r#"
            [notices]
            locale = "en"

            [pricing]
            discount = { percentage = 1500 }

            [output]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.notices.locale, Locale::English);
        assert_eq!(config.pricing.discount, DiscountPolicy::Percentage(1500));
        assert_eq!(config.output.format, OutputFormat::Json);
        // Missing section falls back to defaults
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(CliConfig::from_toml("").unwrap(), CliConfig::default());
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let result = CliConfig::from_toml("[pricing]\ndiscount = \"black-friday\"");
        assert!(matches!(result, Err(CliError::ConfigParse(_))));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = CliConfig::default();
        config.apply_env_overrides(env(&[
            ("VITRINE_LOCALE", "english"),
            ("VITRINE_DISCOUNT", "default"),
            ("VITRINE_LOG", "vitrine_core=debug"),
            ("VITRINE_OUTPUT", "json"),
        ]));

        assert_eq!(config.notices.locale, Locale::English);
        assert_eq!(config.pricing.discount, DiscountPolicy::Default);
        assert_eq!(config.logging.filter, "vitrine_core=debug");
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let mut config = CliConfig::default();
        config.apply_env_overrides(env(&[
            ("VITRINE_LOCALE", "klingon"),
            ("VITRINE_DISCOUNT", "half-off"),
        ]));
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_load_leaves_validation_to_caller() {
        let path = std::env::temp_dir().join("vitrine-load-unvalidated.toml");
        std::fs::write(&path, "[logging]\nfilter = \"info\"\n").unwrap();

        let config = CliConfig::load_with(
            Some(path.clone()),
            env(&[("VITRINE_DISCOUNT", "percentage:20000")]),
        )
        .unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.logging.filter, "info");
        assert_eq!(config.pricing.discount, DiscountPolicy::Percentage(20_000));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_explicit_file_is_io_error() {
        let path = std::env::temp_dir().join("vitrine-does-not-exist.toml");
        let result = CliConfig::load_with(Some(path), env(&[]));
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn test_config_validation() {
        let mut config = CliConfig::default();
        config.pricing.discount = DiscountPolicy::Percentage(10_001);
        assert!(matches!(config.validate(), Err(CliError::InvalidConfig(_))));

        let mut config = CliConfig::default();
        config.logging.filter = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&CliConfig::default()).unwrap();
        assert!(toml_str.contains("[notices]"));
        assert!(toml_str.contains("[pricing]"));
        assert_eq!(CliConfig::from_toml(&toml_str).unwrap(), CliConfig::default());
    }
}
