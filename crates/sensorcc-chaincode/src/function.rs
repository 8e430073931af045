use std::fmt;
use std::str::FromStr;

use sensorcc_ledger::ChaincodeStub;

use crate::error::{ChaincodeError, ChaincodeResult};
use crate::handlers;

/// Uniform handler signature: positional args and the borrowed stub in,
/// response payload out.
pub type Handler = fn(&[String], &mut dyn ChaincodeStub) -> ChaincodeResult<Vec<u8>>;

/// The closed set of invocable functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Function {
    Save,
    Query,
    Delete,
    GetHistoryForKey,
}

impl Function {
    pub const ALL: [Function; 4] = [
        Function::Save,
        Function::Query,
        Function::Delete,
        Function::GetHistoryForKey,
    ];

    /// Name as it appears on the wire.
    pub fn name(self) -> &'static str {
        match self {
            Self::Save => "save",
            Self::Query => "query",
            Self::Delete => "del",
            Self::GetHistoryForKey => "getHistoryForKey",
        }
    }

    /// Number of positional arguments the function requires.
    pub fn arity(self) -> usize {
        match self {
            Self::Save => 3,
            Self::Query | Self::Delete | Self::GetHistoryForKey => 1,
        }
    }

    /// Whether a successful call changes ledger state.
    pub fn is_mutating(self) -> bool {
        matches!(self, Self::Save | Self::Delete)
    }

    pub fn handler(self) -> Handler {
        match self {
            Self::Save => handlers::save,
            Self::Query => handlers::query,
            Self::Delete => handlers::delete,
            Self::GetHistoryForKey => handlers::history,
        }
    }

    pub(crate) fn arity_error(self, args: &[String]) -> ChaincodeError {
        ChaincodeError::ArgCount {
            function: self,
            expected: self.arity(),
            actual: args.len(),
        }
    }
}

impl FromStr for Function {
    type Err = ChaincodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| ChaincodeError::UnknownFunction(s.to_string()))
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
