//! Locator synthesis errors.

use thiserror::Error;

use super::ErrorKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthesisError {
    #[error("Pointer target is not an element (got {node_kind} node)")]
    NotAnElement { node_kind: String },

    #[error("Pointer target {0} does not belong to the inspected document")]
    UnknownNode(String),

    #[error("Inspection of {requested} is not permitted from {loaded}")]
    AccessDenied { requested: String, loaded: String },

    #[error("No document is loaded in the inspection surface")]
    NoDocument,
}

impl SynthesisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoDocument => ErrorKind::Network,
            _ => ErrorKind::SynthesisInput,
        }
    }

    pub fn input(&self) -> &'static str {
        match self {
            Self::AccessDenied { .. } | Self::NoDocument => "document",
            _ => "node",
        }
    }
}
