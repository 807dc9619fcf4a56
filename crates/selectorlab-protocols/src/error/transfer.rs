//! Session transfer errors.

use thiserror::Error;

use super::ErrorKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransferError {
    #[error("No transfer payload in this session")]
    NoPayload,

    #[error("Transfer token does not match the stored payload")]
    TokenMismatch,

    #[error("Transfer payload is corrupt: {0}")]
    Corrupt(String),
}

impl TransferError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::TransferCorrupt
    }

    pub fn input(&self) -> &'static str {
        match self {
            Self::Corrupt(_) => "payload",
            _ => "token",
        }
    }
}
