//! Types for authentication and profile data

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::error::ResendError;
use crate::error::Error as TransportError;

/// The authenticated member's profile projection cached client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Display name, assembled from the first- and last-name attributes
    #[serde(rename = "user_name")]
    pub name: String,

    /// The member's email address
    pub email: String,
}

/// Opaque bearer credentials issued by the identity service.
///
/// The three token fields are either all populated or all absent; a
/// partially populated bundle is a defect, not a valid state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBundle {
    pub id_token: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,

    /// Opaque user identifier; not covered by the all-or-nothing invariant
    pub user_id: Option<String>,
}

impl TokenBundle {
    /// The anonymous bundle: every field absent.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// True when all three token fields are populated.
    pub fn is_complete(&self) -> bool {
        self.id_token.is_some() && self.access_token.is_some() && self.refresh_token.is_some()
    }

    /// True when all three token fields are absent.
    pub fn is_anonymous(&self) -> bool {
        self.id_token.is_none() && self.access_token.is_none() && self.refresh_token.is_none()
    }

    /// A bundle is well-formed only in the two extreme states.
    pub fn is_well_formed(&self) -> bool {
        self.is_complete() || self.is_anonymous()
    }
}

/// Body of a successful `/login` response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub id_token: String,
    pub access_token: String,
    pub refresh_token: String,

    /// Not sent by every backend generation
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Raw attribute map returned by `GET /user`.
pub type AttributeMap = HashMap<String, String>;

/// Attribute name whose value carries the member's verification status.
pub const EMAIL_VERIFIED: &str = "email_verified";

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UserAttributesResponse {
    pub user_attributes: AttributeMap,
}

/// Logical profile attributes a member can update.
///
/// The closed set keeps unknown attribute names from ever reaching the
/// server; [`backend_name`](Self::backend_name) carries the translation
/// to the identity pool's attribute identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileAttribute {
    FirstName,
    LastName,
    Email,
    Password,
}

impl ProfileAttribute {
    /// The attribute identifier the backend expects.
    pub fn backend_name(&self) -> &'static str {
        match self {
            ProfileAttribute::FirstName => "custom:firstName",
            ProfileAttribute::LastName => "custom:lastName",
            ProfileAttribute::Email => "email",
            ProfileAttribute::Password => "password",
        }
    }
}

/// A logical attribute name outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown profile attribute: {0}")]
pub struct UnknownAttribute(String);

impl FromStr for ProfileAttribute {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "firstName" => ProfileAttribute::FirstName,
            "lastName" => ProfileAttribute::LastName,
            "email" => ProfileAttribute::Email,
            "password" => ProfileAttribute::Password,
            other => return Err(UnknownAttribute(other.to_string())),
        })
    }
}

/// Result of the multi-step sign-up flow.
///
/// Account creation and the session-establishing sign-in are mandatory.
/// The auto-confirmation and code-delivery steps are best-effort and
/// report their outcome here instead of failing the flow.
#[derive(Debug)]
pub struct SignUpOutcome {
    /// Token bundle from the sign-in that established the session
    pub tokens: TokenBundle,

    /// Outcome of the server-side auto-confirmation step
    pub confirmed: Result<(), TransportError>,

    /// Outcome of the verification-code delivery request
    pub code_sent: Result<(), ResendError>,
}
