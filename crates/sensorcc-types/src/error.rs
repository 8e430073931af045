use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid transaction id: {0}")]
    InvalidTxId(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
