//! Analytics client errors

use thiserror::Error;

/// Error code attached when the backend refuses connections
pub const CONNECTION_REFUSED: &str = "CONNECTION_REFUSED";
/// Error code attached to input rejected before any request is made
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";

/// Broad class of an [`ApiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Backend not reachable
    Unavailable,
    /// Backend answered with a non-2xx status
    Server,
    /// Input rejected locally
    Validation,
    Timeout,
    /// Response body did not match the expected shape
    Decode,
    /// Any other transport failure
    Transport,
}

/// Error returned by every analytics client call
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    kind: ErrorKind,
    pub message: String,
    pub status: Option<u16>,
    pub code: Option<String>,
}

impl ApiError {
    pub fn unavailable() -> Self {
        Self {
            kind: ErrorKind::Unavailable,
            message: "Backend server is not running. Please start the backend service.".to_string(),
            status: Some(503),
            code: Some(CONNECTION_REFUSED.to_string()),
        }
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Server,
            message: message.into(),
            status: Some(status),
            code: None,
        }
    }

    /// Backend answered but reported the operation as unsuccessful
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Server,
            message: message.into(),
            status: None,
            code: None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: message.into(),
            status: None,
            code: Some(VALIDATION_ERROR.to_string()),
        }
    }

    pub fn timeout() -> Self {
        Self {
            kind: ErrorKind::Timeout,
            message: "Request timed out".to_string(),
            status: None,
            code: None,
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Decode,
            message: message.into(),
            status: None,
            code: None,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Transport,
            message: message.into(),
            status: None,
            code: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::timeout()
        } else if e.is_connect() {
            ApiError::unavailable()
        } else if e.is_decode() {
            ApiError::decode(e.to_string())
        } else if let Some(status) = e.status() {
            ApiError::server(status.as_u16(), e.to_string())
        } else {
            ApiError::transport(e.to_string())
        }
    }
}
