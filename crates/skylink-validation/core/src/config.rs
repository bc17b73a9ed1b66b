// File: src/config.rs
// Purpose: Configuration parsing from skylink.toml

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::SubmitPolicy;

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub rules: RulesConfig,

    #[serde(default)]
    pub seats: SeatsConfig,
}

/// Engine behaviour
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    /// What a submit attempt checks (default: baseline constraints only)
    #[serde(default)]
    pub submit_policy: SubmitPolicy,
}

/// Thresholds and message overrides for the rule table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default = "default_password_min_length")]
    pub password_min_length: usize,

    #[serde(default = "default_card_min_digits")]
    pub card_min_digits: usize,

    #[serde(default = "default_card_max_digits")]
    pub card_max_digits: usize,

    #[serde(default = "default_cvv_min_digits")]
    pub cvv_min_digits: usize,

    #[serde(default = "default_cvv_max_digits")]
    pub cvv_max_digits: usize,

    /// Field name -> replacement failure message
    #[serde(default)]
    pub messages: HashMap<String, String>,
}

/// Seat picker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatsConfig {
    /// Used when the page does not say how many seats may be picked
    #[serde(default = "default_max_seats")]
    pub max_seats: usize,
}

// Default values
fn default_password_min_length() -> usize {
    6
}

fn default_card_min_digits() -> usize {
    13
}

fn default_card_max_digits() -> usize {
    19
}

fn default_cvv_min_digits() -> usize {
    3
}

fn default_cvv_max_digits() -> usize {
    4
}

fn default_max_seats() -> usize {
    1
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            password_min_length: default_password_min_length(),
            card_min_digits: default_card_min_digits(),
            card_max_digits: default_card_max_digits(),
            cvv_min_digits: default_cvv_min_digits(),
            cvv_max_digits: default_cvv_max_digits(),
            messages: HashMap::new(),
        }
    }
}

impl Default for SeatsConfig {
    fn default() -> Self {
        Self {
            max_seats: default_max_seats(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::parse(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./skylink.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("skylink.toml")
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(content)?;
        config.rules.check_ranges()?;
        Ok(config)
    }
}

impl RulesConfig {
    fn check_ranges(&self) -> Result<()> {
        if self.card_min_digits > self.card_max_digits {
            anyhow::bail!(
                "rules.card_min_digits ({}) exceeds rules.card_max_digits ({})",
                self.card_min_digits,
                self.card_max_digits
            );
        }
        if self.cvv_min_digits > self.cvv_max_digits {
            anyhow::bail!(
                "rules.cvv_min_digits ({}) exceeds rules.cvv_max_digits ({})",
                self.cvv_min_digits,
                self.cvv_max_digits
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.engine.submit_policy, SubmitPolicy::BaselineOnly);
        assert_eq!(config.rules.password_min_length, 6);
        assert_eq!(config.rules.card_min_digits, 13);
        assert_eq!(config.rules.card_max_digits, 19);
        assert_eq!(config.rules.cvv_min_digits, 3);
        assert_eq!(config.rules.cvv_max_digits, 4);
        assert_eq!(config.seats.max_seats, 1);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::parse("   \n").unwrap();
        assert_eq!(config.rules.password_min_length, 6);
        assert!(config.rules.messages.is_empty());
    }

    #[test]
    fn test_custom_config() {
        let toml = r#"
            [engine]
            submit_policy = "baseline_and_rules"

            [rules]
            password_min_length = 10

            [rules.messages]
            email = "That email doesn't look right"

            [seats]
            max_seats = 4
        "#;
        let config = Config::parse(toml).unwrap();
        assert_eq!(config.engine.submit_policy, SubmitPolicy::BaselineAndRules);
        assert_eq!(config.rules.password_min_length, 10);
        assert_eq!(config.rules.card_max_digits, 19);
        assert_eq!(
            config.rules.messages.get("email").map(String::as_str),
            Some("That email doesn't look right")
        );
        assert_eq!(config.seats.max_seats, 4);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let toml = r#"
            [rules]
            cvv_min_digits = 5
        "#;
        let err = Config::parse(toml).unwrap_err();
        assert!(err.to_string().contains("cvv_min_digits"));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("skylink.toml")).unwrap();
        assert_eq!(config.seats.max_seats, 1);
    }

    #[test]
    fn test_load_reports_path_on_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[rules]\npassword_min_length = \"six\"").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }
}
