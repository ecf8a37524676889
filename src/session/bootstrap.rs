//! One-time reconciliation of durable storage into live session state

use std::sync::atomic::Ordering;

use super::SessionState;

impl SessionState {
    /// Reconcile persisted session data into memory.
    ///
    /// Runs at most once per state instance, reads storage only, and
    /// never touches the network: locally cached tokens are trusted until
    /// an authenticated request fails. A lone or corrupt blob hydrates
    /// nothing; the session stays anonymous rather than half-populated.
    pub fn hydrate(&self) {
        if self.hydrated.swap(true, Ordering::SeqCst) {
            return;
        }

        if let (Some(user), Some(tokens)) = (self.store.load_user(), self.store.load_tokens()) {
            if tokens.is_complete() {
                // Cannot fail: completeness was just checked.
                let _ = self.set_login(user, tokens);
            }
        }

        if let Some(language) = self.store.load_language() {
            // Applied directly: hydrate must not write back to storage.
            self.current.send_modify(|session| session.language = language);
        }
    }
}
