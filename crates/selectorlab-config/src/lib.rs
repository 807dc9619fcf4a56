//! # SelectorLab Config
//!
//! Configuration management for the SelectorLab pipeline.

mod compat;
mod error;
mod loader;
mod schema;
mod validator;

pub use compat::detect_compat_layer;
pub use error::ConfigError;
pub use loader::{ConfigLoader, ENV_ENDPOINT_URL, ENV_MOCK_MODE, parse_flag};
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
