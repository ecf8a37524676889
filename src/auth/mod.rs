//! The identity gateway: every state-changing call to the auth backend

pub mod error;
pub mod types;

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::Client;
use tracing::warn;

use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::Fetch;
use crate::session::SessionState;

use self::error::{
    FetchProfileError, ResendError, ResetConfirmError, ResetRequestError, SignInError,
    SignUpError, UpdateProfileError, VerifyError,
};
use self::types::{
    AttributeMap, LoginResponse, ProfileAttribute, SignUpOutcome, TokenBundle, User,
    UserAttributesResponse,
};

/// Client for the identity endpoints of the portal backend.
///
/// Each operation is one or more HTTP calls with a fixed order and a
/// single externally visible outcome. Nothing retries; every failure
/// surfaces to the caller, which owns the user-visible display.
pub struct AuthGateway {
    url: String,
    client: Client,
    session: Arc<SessionState>,
    options: ClientOptions,
}

impl AuthGateway {
    pub(crate) fn new(
        url: &str,
        client: Client,
        session: Arc<SessionState>,
        options: ClientOptions,
    ) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            client,
            session,
            options,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }

    /// Register a new member.
    ///
    /// Creates the account, auto-confirms it (best effort), signs the new
    /// member in to establish the session, and requests delivery of an
    /// email verification code (best effort). The two best-effort steps
    /// report their outcome on [`SignUpOutcome`] instead of failing the
    /// flow; a failed sign-in aborts with [`SignUpError::SignIn`].
    pub async fn sign_up(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> Result<SignUpOutcome, SignUpError> {
        let mut body = HashMap::new();
        body.insert("first_name", first_name);
        body.insert("last_name", last_name);
        body.insert("email", email);
        body.insert("password", password);

        Fetch::post(&self.client, &self.endpoint("/signup"))
            .json(&body)?
            .execute_empty()
            .await?;

        let confirmed = self.confirm_account(email).await;
        if let Err(err) = &confirmed {
            warn!(error = %err, "account auto-confirmation failed; continuing");
        }

        let tokens = self
            .sign_in(email, password)
            .await
            .map_err(SignUpError::SignIn)?;

        let code_sent = self
            .resend_verification_code(tokens.access_token.as_deref())
            .await;
        if let Err(err) = &code_sent {
            warn!(error = %err, "verification code delivery failed");
        }

        Ok(SignUpOutcome {
            tokens,
            confirmed,
            code_sent,
        })
    }

    // Server-side auto-confirmation of a freshly created account.
    async fn confirm_account(&self, email: &str) -> Result<(), Error> {
        let mut body = HashMap::new();
        body.insert("email", email);

        Fetch::post(&self.client, &self.endpoint("/confirm"))
            .json(&body)?
            .execute_empty()
            .await
    }

    /// Sign a member in and establish the session.
    ///
    /// `/login` yields the token bundle; the display name then comes from
    /// `/user`. The profile fetch is required, not best-effort: a session
    /// is never established without it. Both blobs are persisted before
    /// the in-memory state is replaced.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<TokenBundle, SignInError> {
        let mut body = HashMap::new();
        body.insert("email", email);
        body.insert("password", password);

        let login: LoginResponse = Fetch::post(&self.client, &self.endpoint("/login"))
            .json(&body)?
            .execute()
            .await?;

        let attributes = self
            .user_attributes(email)
            .await
            .map_err(SignInError::Other)?;

        let name = format!(
            "{} {}",
            attributes
                .get(ProfileAttribute::FirstName.backend_name())
                .map(String::as_str)
                .unwrap_or_default(),
            attributes
                .get(ProfileAttribute::LastName.backend_name())
                .map(String::as_str)
                .unwrap_or_default(),
        );

        let user = User {
            name,
            email: email.to_string(),
        };
        let tokens = TokenBundle {
            id_token: Some(login.id_token),
            access_token: Some(login.access_token),
            refresh_token: Some(login.refresh_token),
            user_id: login.user_id,
        };

        if self.options.persist_session {
            self.session.store().save_login(&user, &tokens);
        }
        self.session
            .set_login(user, tokens.clone())
            .expect("freshly assembled bundle is complete");

        Ok(tokens)
    }

    /// Sign out locally: clear the persisted blobs, then the in-memory
    /// session. No network call is involved and the operation cannot fail.
    pub fn sign_out(&self) {
        self.session.store().clear_login();
        self.session.set_logout();
    }

    /// Start a password reset; the backend emails a confirmation code.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), ResetRequestError> {
        let mut body = HashMap::new();
        body.insert("email", email);

        Fetch::post(&self.client, &self.endpoint("/forgot-password"))
            .json(&body)?
            .execute_empty()
            .await?;

        Ok(())
    }

    /// Complete a password reset with the emailed code.
    pub async fn confirm_password_reset(
        &self,
        email: &str,
        confirmation_code: &str,
        new_password: &str,
    ) -> Result<(), ResetConfirmError> {
        let mut body = HashMap::new();
        body.insert("email", email);
        body.insert("confirmation_code", confirmation_code);
        body.insert("new_password", new_password);

        Fetch::post(&self.client, &self.endpoint("/confirm-forgot-password"))
            .json(&body)?
            .execute_empty()
            .await?;

        Ok(())
    }

    /// Verify the member's email address with the emailed code.
    pub async fn verify_email(
        &self,
        access_token: &str,
        confirmation_code: &str,
    ) -> Result<(), VerifyError> {
        let mut body = HashMap::new();
        body.insert("access_token", access_token);
        body.insert("confirmation_code", confirmation_code);

        Fetch::post(&self.client, &self.endpoint("/confirm-email"))
            .json(&body)?
            .execute_empty()
            .await?;

        Ok(())
    }

    /// Request a fresh verification code for the logged-in member.
    ///
    /// A missing access token is rejected locally; no request is issued.
    pub async fn resend_verification_code(
        &self,
        access_token: Option<&str>,
    ) -> Result<(), ResendError> {
        let token = access_token.ok_or(ResendError::NotLoggedIn)?;

        let mut body = HashMap::new();
        body.insert("access_token", token);

        Fetch::post(&self.client, &self.endpoint("/confirm-email-resend"))
            .json(&body)?
            .execute_empty()
            .await?;

        Ok(())
    }

    /// Fetch the raw attribute map for a member.
    ///
    /// Verification status is the `email_verified` attribute; callers
    /// re-derive it from each fetch, the gateway does not track it.
    pub async fn fetch_profile_attributes(
        &self,
        email: &str,
    ) -> Result<AttributeMap, FetchProfileError> {
        self.user_attributes(email).await.map_err(FetchProfileError::from)
    }

    /// Update a single profile attribute.
    ///
    /// The logical attribute is translated to the backend identifier
    /// client-side; unknown names never reach the server.
    pub async fn update_profile_attribute(
        &self,
        email: &str,
        attribute: ProfileAttribute,
        value: &str,
    ) -> Result<(), UpdateProfileError> {
        let body = serde_json::json!({
            "email": email,
            "attribute_updates": { attribute.backend_name(): value },
        });

        Fetch::patch(&self.client, &self.endpoint("/user"))
            .json(&body)?
            .execute_empty()
            .await?;

        Ok(())
    }

    async fn user_attributes(&self, email: &str) -> Result<AttributeMap, Error> {
        let mut query = HashMap::new();
        query.insert("email".to_string(), email.to_string());

        let response: UserAttributesResponse = Fetch::get(&self.client, &self.endpoint("/user"))
            .query(query)
            .execute()
            .await?;

        Ok(response.user_attributes)
    }
}
