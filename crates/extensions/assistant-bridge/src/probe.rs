//! Connectivity probe for the assistant endpoint.

use std::time::Duration;

use tracing::{info, warn};

use selectorlab_config::Config;
use selectorlab_protocols::provider::LLMProvider;
use selectorlab_protocols::wire::ProbeReport;
use selectorlab_provider_openai::OpenAIProvider;

/// Lightweight reachability check: `GET {endpoint}/models`, retried.
#[derive(Debug, Clone)]
pub struct ConnectivityProbe {
    attempts: u32,
    retry_delay: Duration,
    timeout: Duration,
    api_key: Option<String>,
}

impl ConnectivityProbe {
    pub fn new(attempts: u32, retry_delay: Duration, timeout: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            retry_delay,
            timeout,
            api_key: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            api_key: config.assistant.api_key.clone(),
            ..Self::new(
                config.assistant.probe_retries,
                config.assistant.retry_delay(),
                config.network.effective_timeout(),
            )
        }
    }

    /// Same settings, a single attempt per endpoint.
    pub fn single_attempt(&self) -> Self {
        Self {
            attempts: 1,
            ..self.clone()
        }
    }

    pub async fn probe(&self, endpoint: &str) -> ProbeReport {
        let provider = OpenAIProvider::with_base_url(endpoint, self.api_key.clone(), self.timeout);
        self.probe_provider(&provider).await
    }

    pub async fn probe_provider(&self, provider: &dyn LLMProvider) -> ProbeReport {
        let endpoint = provider.base_url().to_string();
        let mut last_error = None;

        for attempt in 1..=self.attempts {
            match provider.list_models().await {
                Ok(models) => {
                    info!(endpoint = %endpoint, models = models.len(), attempt, "Assistant endpoint reachable");
                    return ProbeReport {
                        endpoint,
                        reachable: true,
                        models,
                        error: None,
                    };
                }
                Err(e) => {
                    warn!(endpoint = %endpoint, attempt, attempts = self.attempts, error = %e, "Probe attempt failed");
                    last_error = Some(e.to_string());
                    if attempt < self.attempts {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
            }
        }

        ProbeReport {
            endpoint,
            reachable: false,
            models: Vec::new(),
            error: last_error,
        }
    }
}
