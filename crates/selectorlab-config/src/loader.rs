//! Configuration loader.

use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::debug;

use crate::error::ConfigError;
use crate::schema::Config;

/// Overrides `assistant.endpoint_url`.
pub const ENV_ENDPOINT_URL: &str = "SELECTORLAB_ENDPOINT_URL";

/// Overrides `assistant.mock_mode` (`true/1/yes/y`, `false/0/no/n`, `auto`).
pub const ENV_MOCK_MODE: &str = "SELECTORLAB_MOCK_MODE";

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load from `path` if it exists, otherwise start from defaults.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("Config file {} not found, using defaults", path.display());
            Ok(Config::default())
        }
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Apply `SELECTORLAB_*` overrides from the process environment.
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides_from(config, |key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source.
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_ENDPOINT_URL) {
            let url = url.trim();
            if !url.is_empty() {
                debug!("{} overrides endpoint_url", ENV_ENDPOINT_URL);
                config.assistant.endpoint_url = url.to_string();
            }
        }

        if let Some(raw) = lookup(ENV_MOCK_MODE) {
            config.assistant.mock_mode =
                parse_flag(&raw).map_err(|message| ConfigError::InvalidValue {
                    field: ENV_MOCK_MODE.to_string(),
                    message,
                })?;
        }

        Ok(())
    }

    /// Expand environment variables in the format `${VAR}`.
    ///
    /// Comment lines are left untouched.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConfigError::Invalid(e.to_string()))?;
        let mut lines = Vec::new();

        for line in content.lines() {
            if line.trim_start().starts_with('#') {
                lines.push(line.to_string());
                continue;
            }
            let mut expanded = line.to_string();
            for cap in re.captures_iter(line) {
                let var_name = &cap[1];
                let var_value = std::env::var(var_name)
                    .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
                expanded = expanded.replace(&cap[0], &var_value);
            }
            lines.push(expanded);
        }

        Ok(lines.join("\n"))
    }
}

/// Parse a tri-state flag: `Some(true)`, `Some(false)`, or `None` for auto.
pub fn parse_flag(raw: &str) -> Result<Option<bool>, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "n" | "off" => Ok(Some(false)),
        "" | "auto" => Ok(None),
        other => Err(format!("expected a boolean or 'auto', got '{}'", other)),
    }
}
