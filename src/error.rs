//! Error handling for the portal client

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Unified transport-level error type for the portal client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// A non-2xx response from the backend, with its parsed failure body
    #[error("{0}")]
    Api(ApiFault),
}

impl Error {
    /// The failure message supplied by the server, when the backend
    /// answered at all. Network-level failures return `None`.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Api(fault) => fault.message.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn fault_code(&self) -> Option<FaultCode> {
        match self {
            Error::Api(fault) => fault.code(),
            _ => None,
        }
    }
}

/// Failure body returned by the backend on every non-2xx response.
///
/// An empty or unparseable body still yields a fault; only the status is
/// carried in that case.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiFault {
    /// HTTP status of the failed response
    #[serde(skip)]
    pub status: u16,

    /// Human-readable failure message
    pub message: Option<String>,

    /// Short code used to select a localized message client-side
    #[serde(rename = "errorType")]
    pub error_type: Option<String>,
}

impl ApiFault {
    pub(crate) fn code(&self) -> Option<FaultCode> {
        if let Some(code) = self.error_type.as_deref().and_then(FaultCode::from_error_type) {
            return Some(code);
        }
        self.message.as_deref().and_then(FaultCode::from_message)
    }
}

impl fmt::Display for ApiFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API error {}", self.status)?;
        if let Some(code) = &self.error_type {
            write!(f, " ({})", code)?;
        }
        if let Some(message) = &self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

/// Backend failure codes the client recognizes, across all operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FaultCode {
    UserNotFound,
    IncorrectCredentials,
    NotAuthorized,
    CodeMismatch,
    ExpiredCode,
    LimitExceeded,
    InvalidPassword,
    InvalidParameter,
    TooManyRequests,
    EmailExists,
}

impl FaultCode {
    // Accepts the bare code, the identity pool's `...Exception` spelling,
    // and the per-operation aliases.
    fn from_error_type(raw: &str) -> Option<Self> {
        let name = raw.strip_suffix("Exception").unwrap_or(raw);
        Some(match name {
            "UserNotFound" => Self::UserNotFound,
            "IncorrectCredentials" => Self::IncorrectCredentials,
            "NotAuthorized" => Self::NotAuthorized,
            "CodeMismatch" | "InvalidCode" => Self::CodeMismatch,
            "ExpiredCode" => Self::ExpiredCode,
            "LimitExceeded" | "AttemptLimitExceeded" => Self::LimitExceeded,
            "InvalidPassword" | "WeakPassword" => Self::InvalidPassword,
            "InvalidParameter" => Self::InvalidParameter,
            "TooManyRequests" => Self::TooManyRequests,
            "UsernameExists" | "EmailExists" => Self::EmailExists,
            _ => return None,
        })
    }

    // The deployed backend sends only `message`; these are its exact
    // strings.
    fn from_message(raw: &str) -> Option<Self> {
        Some(match raw {
            "User not found" => Self::UserNotFound,
            "Incorrect username or password" => Self::IncorrectCredentials,
            "Not authorized" => Self::NotAuthorized,
            "Invalid confirmation code" => Self::CodeMismatch,
            "Confirmation code expired" => Self::ExpiredCode,
            "Attempt limit exceeded, please try again later" => Self::LimitExceeded,
            "Too many requests. Please try again later." => Self::TooManyRequests,
            "User already exists" => Self::EmailExists,
            _ => return None,
        })
    }
}
