use sensorcc_ledger::LedgerError;
use sensorcc_types::TypeError;
use thiserror::Error;

use crate::function::Function;

/// Errors surfaced to the caller of an invocation.
///
/// The `Display` text of each variant is exactly the message placed in the
/// error response, so existing clients keep matching on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChaincodeError {
    #[error("args error")]
    ArgCount {
        function: Function,
        expected: usize,
        actual: usize,
    },

    #[error("No func")]
    UnknownFunction(String),

    /// The ledger cause is kept for logs but not reported to the caller.
    #[error("del error")]
    DeleteFailed(#[source] LedgerError),

    #[error("getHistoryForKey error")]
    HistoryUnavailable(#[source] LedgerError),

    #[error("{0}")]
    Ledger(#[from] LedgerError),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<TypeError> for ChaincodeError {
    fn from(e: TypeError) -> Self {
        Self::Serialization(e.to_string())
    }
}

pub type ChaincodeResult<T> = Result<T, ChaincodeError>;
