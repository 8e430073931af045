/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("key must not be an empty string")]
    EmptyKey,

    #[error("history iterator is closed")]
    IteratorClosed,

    #[error("history iterator has no more entries")]
    IteratorExhausted,

    #[error("ledger lock poisoned")]
    LockPoisoned,

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("snapshot version {found} is not supported (expected {expected})")]
    UnsupportedSnapshot { found: u32, expected: u32 },

    #[error("I/O error: {0}")]
    Io(String),

    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

impl From<std::io::Error> for LedgerError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
