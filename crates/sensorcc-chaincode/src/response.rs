use std::borrow::Cow;

use crate::error::ChaincodeResult;

/// Status code of a successful response.
pub const OK: i32 = 200;
/// Status code of a failed response.
pub const ERROR: i32 = 500;

/// The envelope every invocation returns to the host.
///
/// A success carries a payload and no message; an error carries a message
/// and no payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: i32,
    pub message: String,
    pub payload: Vec<u8>,
}

impl Response {
    pub fn success(payload: Vec<u8>) -> Self {
        Self {
            status: OK,
            message: String::new(),
            payload,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ERROR,
            message: message.into(),
            payload: Vec::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == OK
    }

    /// Payload as text, lossily decoded.
    pub fn payload_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }
}

impl From<ChaincodeResult<Vec<u8>>> for Response {
    fn from(result: ChaincodeResult<Vec<u8>>) -> Self {
        match result {
            Ok(payload) => Self::success(payload),
            Err(e) => Self::error(e.to_string()),
        }
    }
}
