//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Collapse errors into a single [`ConfigError`], if any.
    pub fn into_error(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        if self.errors.is_empty() {
            return Ok(self.warnings);
        }
        let joined = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.path, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        Err(ConfigError::Invalid(joined))
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_assistant(config, &mut result);
        Self::validate_network(config, &mut result);
        Self::validate_verify(config, &mut result);
        Self::validate_inspect(config, &mut result);

        result
    }

    fn validate_assistant(config: &Config, result: &mut ValidationResult) {
        let assistant = &config.assistant;

        match url::Url::parse(&assistant.endpoint_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(_) => result.add_error(ValidationError::new(
                "assistant.endpoint_url",
                "endpoint_url must start with http:// or https://",
            )),
            Err(e) => result.add_error(ValidationError::new(
                "assistant.endpoint_url",
                format!("endpoint_url is not a valid URL: {}", e),
            )),
        }

        if !(0.0..=2.0).contains(&assistant.temperature) {
            result.add_error(ValidationError::new(
                "assistant.temperature",
                "temperature must be between 0.0 and 2.0",
            ));
        }

        if assistant.max_tokens == 0 {
            result.add_error(ValidationError::new(
                "assistant.max_tokens",
                "max_tokens must be greater than 0",
            ));
        }

        if assistant.probe_retries == 0 {
            result.add_warning(ValidationWarning::new(
                "assistant.probe_retries",
                "probe_retries is 0, the connectivity probe will try once",
            ));
        }

        if assistant.model.is_empty() {
            result.add_error(ValidationError::new("assistant.model", "Model cannot be empty"));
        }
    }

    fn validate_network(config: &Config, result: &mut ValidationResult) {
        let network = &config.network;

        if network.timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "network.timeout_secs",
                "timeout_secs must be greater than 0",
            ));
        }

        if network.relaxed_timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "network.relaxed_timeout_secs",
                "relaxed_timeout_secs must be greater than 0",
            ));
        }

        if network.relaxed_timeout_secs < network.timeout_secs {
            result.add_warning(ValidationWarning::new(
                "network.relaxed_timeout_secs",
                "relaxed_timeout_secs is shorter than timeout_secs, the normal timeout will be used",
            ));
        }
    }

    fn validate_verify(config: &Config, result: &mut ValidationResult) {
        if config.verify.preview_chars == 0 {
            result.add_error(ValidationError::new(
                "verify.preview_chars",
                "preview_chars must be greater than 0",
            ));
        }
    }

    fn validate_inspect(config: &Config, result: &mut ValidationResult) {
        for class in &config.inspect.excluded_classes {
            if class.trim().is_empty() || class.contains(char::is_whitespace) {
                result.add_error(ValidationError::new(
                    "inspect.excluded_classes",
                    format!("'{}' is not a single class name", class),
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
