//! Error types for the façade and the modal flows

use thiserror::Error;

/// Failure of a façade call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Server answered with a non-2xx status
    #[error("API error {status}: {status_text}")]
    Status { status: u16, status_text: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Failed to encode request: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn status(status: u16, status_text: impl Into<String>) -> Self {
        ApiError::Status {
            status,
            status_text: status_text.into(),
        }
    }

    pub fn network(msg: impl Into<String>) -> Self {
        ApiError::Network(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        ApiError::Decode(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        ApiError::Encode(msg.into())
    }

    /// Numeric HTTP status, when the failure came from a response
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Operation invoked on the unlock controller in a state where it has no meaning
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnlockError {
    #[error("Unlock flow is not open")]
    NotOpen,

    #[error("Expected {expected} phase, controller is in {actual}")]
    WrongPhase {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Switching to PIN requires 1 or 2 failed scans (have {failures})")]
    SwitchUnavailable { failures: u8 },
}

/// Misuse of the FX confirmation gate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("A save is already waiting for FX confirmation")]
    AlreadyOpen,

    #[error("No save is waiting for FX confirmation")]
    NotOpen,
}

/// Failure while recording a transaction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EntryError {
    #[error("Invalid transaction: {0}")]
    InvalidDraft(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Gate(#[from] GateError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ApiError::status(503, "Service Unavailable");
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");
        assert_eq!(err.status_code(), Some(503));
    }

    #[test]
    fn test_non_status_errors_have_no_code() {
        assert_eq!(ApiError::network("connection refused").status_code(), None);
        assert_eq!(ApiError::decode("expected array").status_code(), None);
    }
}
