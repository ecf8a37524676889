//! Per-operation failure taxonomies for the identity gateway
//!
//! Each operation exposes a closed union of the failures a view can react
//! to, plus an `Other` arm carrying the transport error. Classification
//! happens once, in the `From` conversions; network-level failures always
//! land on `Other`.

use thiserror::Error;

use crate::error::{Error as TransportError, FaultCode};

/// Failures raised by sign-up.
#[derive(Debug, Error)]
pub enum SignUpError {
    #[error("an account with this email already exists")]
    EmailExists,

    #[error("password does not meet the account policy")]
    WeakPassword,

    #[error("invalid sign-up parameter")]
    InvalidParameter,

    #[error("too many requests")]
    TooManyRequests,

    /// The account was created but the follow-up sign-in failed
    #[error("sign-in after sign-up failed: {0}")]
    SignIn(SignInError),

    #[error("sign-up failed: {0}")]
    Other(TransportError),
}

impl From<TransportError> for SignUpError {
    fn from(err: TransportError) -> Self {
        match err.fault_code() {
            Some(FaultCode::EmailExists) => SignUpError::EmailExists,
            Some(FaultCode::InvalidPassword) => SignUpError::WeakPassword,
            Some(FaultCode::InvalidParameter) => SignUpError::InvalidParameter,
            Some(FaultCode::TooManyRequests) => SignUpError::TooManyRequests,
            _ => SignUpError::Other(err),
        }
    }
}

/// Failures raised by sign-in.
#[derive(Debug, Error)]
pub enum SignInError {
    #[error("incorrect email or password")]
    IncorrectCredentials,

    #[error("no account for this email")]
    UserNotFound,

    #[error("sign-in failed: {0}")]
    Other(TransportError),
}

impl From<TransportError> for SignInError {
    fn from(err: TransportError) -> Self {
        match err.fault_code() {
            Some(FaultCode::IncorrectCredentials) | Some(FaultCode::NotAuthorized) => {
                SignInError::IncorrectCredentials
            }
            Some(FaultCode::UserNotFound) => SignInError::UserNotFound,
            _ => SignInError::Other(err),
        }
    }
}

/// Failures raised when initiating a password reset.
#[derive(Debug, Error)]
pub enum ResetRequestError {
    #[error("no account for this email")]
    UserNotFound,

    #[error("attempt limit exceeded")]
    AttemptLimitExceeded,

    #[error("password reset request failed: {0}")]
    Other(TransportError),
}

impl From<TransportError> for ResetRequestError {
    fn from(err: TransportError) -> Self {
        match err.fault_code() {
            Some(FaultCode::UserNotFound) => ResetRequestError::UserNotFound,
            Some(FaultCode::LimitExceeded) => ResetRequestError::AttemptLimitExceeded,
            _ => ResetRequestError::Other(err),
        }
    }
}

/// Failures raised when completing a password reset.
#[derive(Debug, Error)]
pub enum ResetConfirmError {
    #[error("invalid confirmation code")]
    InvalidCode,

    #[error("confirmation code expired")]
    ExpiredCode,

    #[error("no account for this email")]
    UserNotFound,

    #[error("attempt limit exceeded")]
    AttemptLimitExceeded,

    #[error("new password does not meet the account policy")]
    WeakPassword,

    #[error("password reset failed: {0}")]
    Other(TransportError),
}

impl From<TransportError> for ResetConfirmError {
    fn from(err: TransportError) -> Self {
        match err.fault_code() {
            Some(FaultCode::CodeMismatch) => ResetConfirmError::InvalidCode,
            Some(FaultCode::ExpiredCode) => ResetConfirmError::ExpiredCode,
            Some(FaultCode::UserNotFound) => ResetConfirmError::UserNotFound,
            Some(FaultCode::LimitExceeded) => ResetConfirmError::AttemptLimitExceeded,
            Some(FaultCode::InvalidPassword) => ResetConfirmError::WeakPassword,
            _ => ResetConfirmError::Other(err),
        }
    }
}

/// Failures raised when verifying the email address.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("invalid confirmation code")]
    CodeMismatch,

    #[error("confirmation code expired")]
    ExpiredCode,

    #[error("not authorized")]
    NotAuthorized,

    #[error("no account for this email")]
    UserNotFound,

    #[error("email verification failed: {0}")]
    Other(TransportError),
}

impl From<TransportError> for VerifyError {
    fn from(err: TransportError) -> Self {
        match err.fault_code() {
            Some(FaultCode::CodeMismatch) => VerifyError::CodeMismatch,
            Some(FaultCode::ExpiredCode) => VerifyError::ExpiredCode,
            Some(FaultCode::NotAuthorized) => VerifyError::NotAuthorized,
            Some(FaultCode::UserNotFound) => VerifyError::UserNotFound,
            _ => VerifyError::Other(err),
        }
    }
}

/// Failures raised when requesting a fresh verification code.
#[derive(Debug, Error)]
pub enum ResendError {
    /// Rejected locally, before any request is made
    #[error("not logged in")]
    NotLoggedIn,

    #[error("attempt limit exceeded")]
    LimitExceeded,

    #[error("not authorized")]
    NotAuthorized,

    #[error("no account for this email")]
    UserNotFound,

    #[error("verification code request failed: {0}")]
    Other(TransportError),
}

impl From<TransportError> for ResendError {
    fn from(err: TransportError) -> Self {
        match err.fault_code() {
            Some(FaultCode::LimitExceeded) => ResendError::LimitExceeded,
            Some(FaultCode::NotAuthorized) => ResendError::NotAuthorized,
            Some(FaultCode::UserNotFound) => ResendError::UserNotFound,
            _ => ResendError::Other(err),
        }
    }
}

/// Failures raised when fetching profile attributes.
#[derive(Debug, Error)]
pub enum FetchProfileError {
    #[error("no account for this email")]
    UserNotFound,

    #[error("invalid parameter")]
    InvalidParameter,

    #[error("too many requests")]
    TooManyRequests,

    #[error("profile fetch failed: {0}")]
    Other(TransportError),
}

impl From<TransportError> for FetchProfileError {
    fn from(err: TransportError) -> Self {
        match err.fault_code() {
            Some(FaultCode::UserNotFound) => FetchProfileError::UserNotFound,
            Some(FaultCode::InvalidParameter) => FetchProfileError::InvalidParameter,
            Some(FaultCode::TooManyRequests) => FetchProfileError::TooManyRequests,
            _ => FetchProfileError::Other(err),
        }
    }
}

/// Failures raised when updating a profile attribute.
#[derive(Debug, Error)]
pub enum UpdateProfileError {
    #[error("no account for this email")]
    UserNotFound,

    #[error("invalid parameter")]
    InvalidParameter,

    #[error("not authorized")]
    NotAuthorized,

    #[error("profile update failed: {0}")]
    Other(TransportError),
}

impl From<TransportError> for UpdateProfileError {
    fn from(err: TransportError) -> Self {
        match err.fault_code() {
            Some(FaultCode::UserNotFound) => UpdateProfileError::UserNotFound,
            Some(FaultCode::InvalidParameter) => UpdateProfileError::InvalidParameter,
            Some(FaultCode::NotAuthorized) => UpdateProfileError::NotAuthorized,
            _ => UpdateProfileError::Other(err),
        }
    }
}
