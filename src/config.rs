//! Configuration options for the portal client

use std::time::Duration;

use crate::i18n::Language;

/// Configuration options for the portal client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Whether login-establishing calls mirror the session into storage
    pub persist_session: bool,

    /// The request timeout; `None` leaves the HTTP stack's default in place
    pub request_timeout: Option<Duration>,

    /// Language applied before any stored preference is loaded
    pub default_language: Language,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            persist_session: true,
            request_timeout: None,
            default_language: Language::EnUs,
        }
    }
}

impl ClientOptions {
    /// Set whether to persist the session
    pub fn with_persist_session(mut self, value: bool) -> Self {
        self.persist_session = value;
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the startup language
    pub fn with_default_language(mut self, value: Language) -> Self {
        self.default_language = value;
        self
    }
}
