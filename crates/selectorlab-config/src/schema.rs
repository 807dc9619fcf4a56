//! Configuration schema definitions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::compat::detect_compat_layer;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub assistant: AssistantConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub verify: VerifyConfig,

    #[serde(default)]
    pub inspect: InspectConfig,
}

/// Assistant endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Base address; `/chat/completions` and `/models` are appended.
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,

    /// Explicit mock toggle. Absent means decide with a connectivity probe.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mock_mode: Option<bool>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_probe_retries")]
    pub probe_retries: u32,

    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Port tried on each auto-discovery candidate host.
    #[serde(default = "default_discovery_port")]
    pub discovery_port: u16,

    /// Markup excerpt limit for generation prompts.
    #[serde(default = "default_max_context_chars")]
    pub max_context_chars: usize,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint_url(),
            mock_mode: None,
            model: default_model(),
            api_key: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            probe_retries: default_probe_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            discovery_port: default_discovery_port(),
            max_context_chars: default_max_context_chars(),
        }
    }
}

impl AssistantConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

fn default_endpoint_url() -> String {
    "http://127.0.0.1:1234/v1".to_string()
}

fn default_model() -> String {
    "local-model".to_string()
}

fn default_temperature() -> f32 {
    0.1
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_probe_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    2000
}

fn default_discovery_port() -> u16 {
    1234
}

fn default_max_context_chars() -> usize {
    10_000
}

/// Outbound network configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Used instead of `timeout_secs` under the compatibility layer.
    #[serde(default = "default_relaxed_timeout_secs")]
    pub relaxed_timeout_secs: u64,

    /// Explicit compatibility-layer flag. Absent means detect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compat_layer: Option<bool>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            relaxed_timeout_secs: default_relaxed_timeout_secs(),
            compat_layer: None,
            user_agent: default_user_agent(),
        }
    }
}

impl NetworkConfig {
    pub fn in_compat_layer(&self) -> bool {
        self.compat_layer.unwrap_or_else(detect_compat_layer)
    }

    /// Bounded timeout for every outbound call.
    pub fn effective_timeout(&self) -> Duration {
        let secs = if self.in_compat_layer() {
            self.relaxed_timeout_secs.max(self.timeout_secs)
        } else {
            self.timeout_secs
        };
        Duration::from_secs(secs.max(1))
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_relaxed_timeout_secs() -> u64 {
    120
}

fn default_user_agent() -> String {
    concat!("selectorlab/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Verification preview configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyConfig {
    /// Maximum characters in `sample_text` / `sample_html` previews.
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            preview_chars: default_preview_chars(),
        }
    }
}

fn default_preview_chars() -> usize {
    200
}

/// Locator synthesis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectConfig {
    /// Class names injected by inspection tooling, never used in paths.
    #[serde(default = "default_excluded_classes")]
    pub excluded_classes: Vec<String>,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            excluded_classes: default_excluded_classes(),
        }
    }
}

fn default_excluded_classes() -> Vec<String> {
    vec!["selectorlab-highlight".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.assistant.endpoint_url, "http://127.0.0.1:1234/v1");
        assert!(config.assistant.mock_mode.is_none());
        assert_eq!(config.assistant.model, "local-model");
        assert_eq!(config.network.timeout_secs, 30);
        assert_eq!(config.verify.preview_chars, 200);
        assert_eq!(config.inspect.excluded_classes, vec!["selectorlab-highlight"]);
    }

    #[test]
    fn test_effective_timeout_normal() {
        let network = NetworkConfig {
            compat_layer: Some(false),
            ..Default::default()
        };
        assert_eq!(network.effective_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_effective_timeout_relaxed() {
        let network = NetworkConfig {
            compat_layer: Some(true),
            ..Default::default()
        };
        assert_eq!(network.effective_timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_effective_timeout_never_below_normal() {
        let network = NetworkConfig {
            timeout_secs: 60,
            relaxed_timeout_secs: 10,
            compat_layer: Some(true),
            ..Default::default()
        };
        assert_eq!(network.effective_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_user_agent_has_version() {
        assert!(default_user_agent().starts_with("selectorlab/"));
    }
}
