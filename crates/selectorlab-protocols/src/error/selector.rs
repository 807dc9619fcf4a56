//! Locator expression errors.

use thiserror::Error;

use super::ErrorKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectorError {
    #[error("Locator name must not be empty")]
    EmptyName,

    #[error("Locator expression must not be empty")]
    EmptyExpression,

    #[error("Unknown extraction suffix '::{suffix}' in '{expression}'")]
    UnknownSuffix { expression: String, suffix: String },

    #[error("Invalid extraction mode: {0}")]
    InvalidMode(String),

    #[error("Invalid CSS selector '{expression}': {message}")]
    Syntax { expression: String, message: String },
}

impl SelectorError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::SelectorSyntax
    }

    /// Name of the caller input responsible for the failure.
    pub fn input(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::InvalidMode(_) => "extraction_mode",
            _ => "expression",
        }
    }
}
