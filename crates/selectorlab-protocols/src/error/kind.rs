//! Error classification shared by all components.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse failure category reported across component boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Target page or assistant endpoint unreachable, timed out, or non-success status.
    Network,
    /// Response was not HTML or could not be read.
    Content,
    /// Locator expression or extraction mode is malformed.
    SelectorSyntax,
    /// Assistant endpoint unreachable, misconfigured, or disabled.
    AssistantUnavailable,
    /// Assistant reply does not match the expected structure.
    AssistantParse,
    /// Session transfer payload missing or malformed.
    TransferCorrupt,
    /// Pointer target is not an element.
    SynthesisInput,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Content => "content",
            Self::SelectorSyntax => "selector_syntax",
            Self::AssistantUnavailable => "assistant_unavailable",
            Self::AssistantParse => "assistant_parse",
            Self::TransferCorrupt => "transfer_corrupt",
            Self::SynthesisInput => "synthesis_input",
        }
    }

    /// Whether the user can fix the failure by changing their own input.
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Self::SelectorSyntax | Self::SynthesisInput)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::SelectorSyntax).unwrap();
        assert_eq!(json, "\"selector_syntax\"");
        let back: ErrorKind = serde_json::from_str("\"assistant_unavailable\"").unwrap();
        assert_eq!(back, ErrorKind::AssistantUnavailable);
    }

    #[test]
    fn test_display_matches_serde_name() {
        for kind in [
            ErrorKind::Network,
            ErrorKind::Content,
            ErrorKind::SelectorSyntax,
            ErrorKind::AssistantUnavailable,
            ErrorKind::AssistantParse,
            ErrorKind::TransferCorrupt,
            ErrorKind::SynthesisInput,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
        }
    }

    #[test]
    fn test_user_correctable() {
        assert!(ErrorKind::SelectorSyntax.is_user_correctable());
        assert!(ErrorKind::SynthesisInput.is_user_correctable());
        assert!(!ErrorKind::Network.is_user_correctable());
    }
}
