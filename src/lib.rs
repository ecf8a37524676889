//! Portal Client Library
//!
//! A Rust client for the church member-portal backend, providing the
//! identity gateway (sign up, sign in, email verification, password
//! reset, profile), an observable session state with durable
//! write-through, form validators, and per-language error translation.

pub mod auth;
pub mod config;
pub mod contact;
pub mod donations;
pub mod error;
pub mod fetch;
pub mod i18n;
pub mod session;
pub mod validate;

use std::sync::Arc;

use reqwest::Client;

use crate::auth::AuthGateway;
use crate::config::ClientOptions;
use crate::contact::ContactClient;
use crate::donations::DonationsClient;
use crate::session::{MemoryStorage, SessionState, SessionStore, StorageBackend};

/// The main entry point for the portal client
pub struct PortalClient {
    /// The base URL of the portal backend
    pub url: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Client options
    pub options: ClientOptions,
    /// Live session state shared across the application
    session: Arc<SessionState>,
}

impl PortalClient {
    /// Create a new portal client with in-memory session storage
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the portal backend
    ///
    /// # Example
    ///
    /// ```
    /// use rcw_portal_client::PortalClient;
    ///
    /// let portal = PortalClient::new("https://api.your-portal.example");
    /// ```
    pub fn new(base_url: &str) -> Self {
        Self::new_with_options(base_url, ClientOptions::default())
    }

    /// Create a new portal client with custom options
    pub fn new_with_options(base_url: &str, options: ClientOptions) -> Self {
        Self::new_with_storage(base_url, options, Arc::new(MemoryStorage::default()))
    }

    /// Create a new portal client over a caller-supplied storage backend
    ///
    /// The backend is where the session mirror and language preference
    /// live across restarts; anything implementing
    /// [`StorageBackend`](crate::session::StorageBackend) works.
    pub fn new_with_storage(
        base_url: &str,
        options: ClientOptions,
        storage: Arc<dyn StorageBackend>,
    ) -> Self {
        let http_client = match options.request_timeout {
            Some(timeout) => Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            None => Client::new(),
        };

        let store = SessionStore::new(storage);
        let session = Arc::new(SessionState::new(store, options.default_language));

        Self {
            url: base_url.trim_end_matches('/').to_string(),
            http_client,
            options,
            session,
        }
    }

    /// Reconcile persisted session data into memory.
    ///
    /// Call once at startup, before anything renders a protected view.
    pub fn bootstrap(&self) {
        self.session.hydrate();
    }

    /// The live session state
    pub fn session(&self) -> Arc<SessionState> {
        Arc::clone(&self.session)
    }

    /// The identity gateway for sign-up, sign-in, and account management
    pub fn auth(&self) -> AuthGateway {
        AuthGateway::new(
            &self.url,
            self.http_client.clone(),
            Arc::clone(&self.session),
            self.options.clone(),
        )
    }

    /// Client for donation orders and recurring-giving subscriptions
    pub fn donations(&self) -> DonationsClient {
        DonationsClient::new(&self.url, self.http_client.clone())
    }

    /// Client for contact-form submissions
    pub fn contact(&self) -> ContactClient {
        ContactClient::new(&self.url, self.http_client.clone())
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::i18n::{Language, Localize};
    pub use crate::PortalClient;
}
