//! Centralized configuration management for pairform

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::models::SelectOption;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Option set offered by the select field
    pub options: Vec<SelectOption>,
    /// Simulated persistence delay (milliseconds)
    pub submit_delay_ms: u64,
    /// Optional path to write the submitted snapshot as JSON
    pub export_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            options: default_options(),
            submit_delay_ms: 500,
            export_path: None,
        }
    }
}

/// The stock four-entry option set
pub fn default_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("option1", "Option 1"),
        SelectOption::new("option2", "Option 2"),
        SelectOption::new("option3", "Option 3"),
        SelectOption::new("option4", "Option 4"),
    ]
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let options = match std::env::var("PAIRFORM_OPTIONS") {
            Ok(spec) => parse_options(&spec)
                .with_context(|| format!("Failed to parse PAIRFORM_OPTIONS = '{}'", spec))?,
            Err(_) => default_options(),
        };

        let submit_delay_ms = parse_env_var("PAIRFORM_SUBMIT_DELAY_MS")?.unwrap_or(500);

        let export_path = std::env::var("PAIRFORM_EXPORT_PATH").ok().map(PathBuf::from);

        Ok(Config {
            options,
            submit_delay_ms,
            export_path,
        })
    }

    /// Get the submit delay as Duration
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.options.is_empty() {
            return Err(anyhow::anyhow!("Option set must not be empty"));
        }

        let mut seen = std::collections::HashSet::new();
        for option in &self.options {
            if option.value.is_empty() {
                return Err(anyhow::anyhow!("Option values must not be empty"));
            }
            if !seen.insert(&option.value) {
                return Err(anyhow::anyhow!("Duplicate option value: {}", option.value));
            }
        }

        if let Some(ref path) = self.export_path {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(anyhow::anyhow!(
                        "Export parent directory does not exist: {}",
                        parent.display()
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Parse an option list of the form `value:Label,value:Label`
fn parse_options(spec: &str) -> Result<Vec<SelectOption>> {
    spec.split(',')
        .map(|entry| {
            let entry = entry.trim();
            match entry.split_once(':') {
                Some((value, label)) if !value.is_empty() => {
                    Ok(SelectOption::new(value.trim(), label.trim()))
                }
                _ => Err(anyhow::anyhow!("Invalid option entry: '{}'", entry)),
            }
        })
        .collect()
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.options.len(), 4);
        assert_eq!(config.options[0].value, "option1");
        assert_eq!(config.options[3].label, "Option 4");
        assert_eq!(config.submit_delay_ms, 500);
        assert!(config.export_path.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_options() {
        let options = parse_options("low:Low, high:High").unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0], SelectOption::new("low", "Low"));
        assert_eq!(options[1], SelectOption::new("high", "High"));

        assert!(parse_options("nolabel").is_err());
        assert!(parse_options(":Label").is_err());
    }

    #[test]
    fn test_validation_rejects_duplicate_values() {
        let config = Config {
            options: vec![
                SelectOption::new("a", "A"),
                SelectOption::new("a", "Also A"),
            ],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_option_set() {
        let config = Config {
            options: Vec::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
