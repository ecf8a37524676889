//! Observable session state and its durable mirror

mod bootstrap;
mod storage;

pub use storage::{MemoryStorage, SessionStore, StorageBackend};

use std::sync::atomic::AtomicBool;

use thiserror::Error;
use tokio::sync::watch;

use crate::auth::types::{TokenBundle, User};
use crate::i18n::Language;

/// Client-held record of the current identity, credentials, and language
/// preference.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub tokens: TokenBundle,
    pub language: Language,
}

impl Session {
    fn empty(language: Language) -> Self {
        Self {
            user: None,
            tokens: TokenBundle::anonymous(),
            language,
        }
    }

    /// Logged-in requires both a user and an access token; neither alone
    /// is sufficient.
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some() && self.tokens.access_token.is_some()
    }
}

/// Contract violations on session-state operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// `set_login` was handed a bundle with only some token fields set
    #[error("token bundle is partially populated")]
    PartialTokenBundle,
}

/// Single source of truth for "is a member logged in".
///
/// Constructed once at startup, shared by reference, torn down never.
/// Views subscribe for change notification; every mutation replaces the
/// affected fields in one step, so no observer sees a half-written
/// session.
pub struct SessionState {
    current: watch::Sender<Session>,
    store: SessionStore,
    hydrated: AtomicBool,
}

impl SessionState {
    pub fn new(store: SessionStore, language: Language) -> Self {
        let (current, _) = watch::channel(Session::empty(language));
        Self {
            current,
            store,
            hydrated: AtomicBool::new(false),
        }
    }

    /// Immutable snapshot of the current session.
    pub fn snapshot(&self) -> Session {
        self.current.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.borrow().is_logged_in()
    }

    /// Watch for session changes; the receiver observes every mutation.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.current.subscribe()
    }

    /// Replace the user and tokens in one step and notify subscribers.
    ///
    /// A partially populated bundle is a caller contract violation and is
    /// rejected rather than installed. Persisting the blobs is the
    /// caller's concern; the gateway writes storage before calling this.
    pub fn set_login(&self, user: User, tokens: TokenBundle) -> Result<(), SessionError> {
        if !tokens.is_complete() {
            return Err(SessionError::PartialTokenBundle);
        }
        self.current.send_modify(|session| {
            session.user = Some(user);
            session.tokens = tokens;
        });
        Ok(())
    }

    /// Drop identity and credentials; the language preference stays.
    pub fn set_logout(&self) {
        self.current.send_modify(|session| {
            session.user = None;
            session.tokens = TokenBundle::anonymous();
        });
    }

    /// Update the language and mirror it to storage immediately; the
    /// preference persists independent of login state.
    pub fn set_language(&self, language: Language) {
        self.store.save_language(language);
        self.current.send_modify(|session| session.language = language);
    }

    pub fn language(&self) -> Language {
        self.current.borrow().language
    }

    pub(crate) fn store(&self) -> &SessionStore {
        &self.store
    }
}
