//! Assistant bridge errors.

use thiserror::Error;

use super::{ErrorKind, ProviderError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssistantError {
    #[error("Assistant unavailable: {0}")]
    Unavailable(String),

    #[error("Could not parse assistant reply: {0}")]
    Parse(String),
}

impl AssistantError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unavailable(_) => ErrorKind::AssistantUnavailable,
            Self::Parse(_) => ErrorKind::AssistantParse,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

impl From<ProviderError> for AssistantError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::InvalidResponse(message) => Self::Parse(message),
            other => Self::Unavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            AssistantError::Unavailable("down".into()).kind(),
            ErrorKind::AssistantUnavailable
        );
        assert_eq!(
            AssistantError::Parse("no json".into()).kind(),
            ErrorKind::AssistantParse
        );
    }

    #[test]
    fn test_from_provider_network() {
        let err = AssistantError::from(ProviderError::Network("connection refused".into()));
        assert!(err.is_unavailable());
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_from_provider_auth_is_unavailable() {
        let err = AssistantError::from(ProviderError::AuthenticationFailed("bad key".into()));
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_from_provider_invalid_response_is_parse() {
        let err = AssistantError::from(ProviderError::InvalidResponse("no choices".into()));
        assert_eq!(err, AssistantError::Parse("no choices".into()));
    }
}
