use std::time::Duration;

use http::StatusCode;
use thiserror::Error;

/// Result type for TestRail client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the TestRail client
#[derive(Error, Debug)]
pub enum Error {
    /// The request never produced a response (refused, reset, DNS, bad TLS...)
    #[error("Connection failed, check parameters for [{url}]: {reason}")]
    Connection { url: String, reason: String },

    /// The transport gave up waiting for the server
    #[error("Request to [{url}] timed out after {duration:?}")]
    Timeout { url: String, duration: Duration },

    /// A read returned something other than 200
    #[error("TestRail returned {status} for [{url}]: {message}")]
    Api {
        url: String,
        status: StatusCode,
        message: String,
    },

    /// A delete/close/add-result call was refused by the server
    #[error("{action} failed for [{id}]: {reason} ({})", .status.as_u16())]
    Rejected {
        action: String,
        id: i64,
        status: StatusCode,
        reason: String,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid request configuration
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The entity is not attached to a live service
    #[error("Entity is not attached to a TestRail service")]
    Detached,
}

impl Error {
    /// Create a new connection error
    pub fn connection(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Connection {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a new timeout error
    pub fn timeout(url: impl Into<String>, duration: Duration) -> Self {
        Error::Timeout {
            url: url.into(),
            duration,
        }
    }

    /// Create a new API error for a failed read
    pub fn api(url: impl Into<String>, status: StatusCode, message: impl Into<String>) -> Self {
        Error::Api {
            url: url.into(),
            status,
            message: message.into(),
        }
    }

    /// Create a new rejection error for a failed delete/close
    pub fn rejected(
        action: impl Into<String>,
        id: i64,
        status: StatusCode,
        reason: impl Into<String>,
    ) -> Self {
        Error::Rejected {
            action: action.into(),
            id,
            status,
            reason: reason.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// Create a new invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Error::InvalidRequest(message.into())
    }

    /// Check if this error came from the network layer
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Connection { .. } | Error::Timeout { .. })
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }

    /// The HTTP status carried by the error, if any
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } | Error::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Error::InvalidRequest(format!("Invalid header value: {}", err))
    }
}
