//! Session errors.

use thiserror::Error;

use selectorlab_protocols::error::{SelectorError, TransferError};
use selectorlab_protocols::types::LocatorSetError;

/// Errors raised while editing a session's locators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// `assign` was called with no staged expression.
    #[error("No expression is staged for naming")]
    NothingStaged,

    #[error(transparent)]
    Selector(#[from] SelectorError),

    #[error(transparent)]
    Locators(#[from] LocatorSetError),

    #[error(transparent)]
    Transfer(#[from] TransferError),
}
