//! Locator verification errors.

use thiserror::Error;

use super::{ErrorKind, FetchError, SelectorError};

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Selector(#[from] SelectorError),
}

impl VerifyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Fetch(e) => e.kind(),
            Self::Selector(e) => e.kind(),
        }
    }

    pub fn input(&self) -> Option<&'static str> {
        match self {
            Self::Fetch(e) => e.input(),
            Self::Selector(e) => Some(e.input()),
        }
    }
}
