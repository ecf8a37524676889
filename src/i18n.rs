//! Language selection and translation of gateway failures
//!
//! Every failure a view can show goes through [`Localize`]: a recognized
//! error kind maps through the per-language table, an unrecognized backend
//! failure falls back to the raw server message, and anything else gets
//! the generic string for the language. The fallback chain is the only
//! recovery path when the backend introduces a new error code.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::auth::error::{
    FetchProfileError, ResendError, ResetConfirmError, ResetRequestError, SignInError,
    SignUpError, UpdateProfileError, VerifyError,
};
use crate::error::Error as TransportError;

/// Interface languages offered by the portal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Language {
    /// English (United States)
    #[default]
    EnUs,
    /// French (France)
    FrFr,
    /// Spanish (Mexico)
    EsMx,
}

impl Language {
    /// The BCP 47 tag the portal persists and compares against.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::EnUs => "en-US",
            Language::FrFr => "fr-FR",
            Language::EsMx => "es-MX",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A language tag outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported language tag: {0}")]
pub struct UnsupportedLanguage(String);

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en-US" => Ok(Language::EnUs),
            "fr-FR" => Ok(Language::FrFr),
            "es-MX" => Ok(Language::EsMx),
            other => Err(UnsupportedLanguage(other.to_string())),
        }
    }
}

/// Translation of a failure into the string a member sees.
pub trait Localize {
    /// The user-facing message for this failure in the given language.
    fn user_message(&self, language: Language) -> String;
}

/// The generic fallback shown when no better string exists.
pub fn generic_error(language: Language) -> &'static str {
    match language {
        Language::EnUs => "An unexpected error occurred. Please try again.",
        Language::FrFr => "Une erreur inattendue s'est produite. Veuillez réessayer.",
        Language::EsMx => "Ocurrió un error inesperado. Inténtalo de nuevo.",
    }
}

// Raw server message if the backend answered, generic string otherwise.
fn fallback(err: &TransportError, language: Language) -> String {
    err.server_message()
        .map(str::to_owned)
        .unwrap_or_else(|| generic_error(language).to_owned())
}

fn no_account(language: Language) -> &'static str {
    match language {
        Language::EnUs => "No account found with this email address.",
        Language::FrFr => "Aucun compte trouvé avec cette adresse e-mail.",
        Language::EsMx => "No se encontró ninguna cuenta con este correo electrónico.",
    }
}

fn attempt_limit(language: Language) -> &'static str {
    match language {
        Language::EnUs => {
            "You have exceeded the maximum number of attempts. Please wait and try again later."
        }
        Language::FrFr => {
            "Vous avez dépassé le nombre maximal de tentatives. Veuillez patienter et réessayer plus tard."
        }
        Language::EsMx => {
            "Has superado el número máximo de intentos. Espera e inténtalo de nuevo más tarde."
        }
    }
}

fn invalid_code(language: Language) -> &'static str {
    match language {
        Language::EnUs => {
            "The confirmation code you entered is incorrect. Please check and try again."
        }
        Language::FrFr => {
            "Le code de confirmation saisi est incorrect. Veuillez vérifier et réessayer."
        }
        Language::EsMx => {
            "El código de confirmación que ingresaste es incorrecto. Verifícalo e inténtalo de nuevo."
        }
    }
}

fn expired_code(language: Language) -> &'static str {
    match language {
        Language::EnUs => "The confirmation code has expired. Please request a new one.",
        Language::FrFr => "Le code de confirmation a expiré. Veuillez en demander un nouveau.",
        Language::EsMx => "El código de confirmación ha expirado. Solicita uno nuevo.",
    }
}

fn weak_password(language: Language) -> &'static str {
    match language {
        Language::EnUs => "This password does not meet the requirements.",
        Language::FrFr => "Ce mot de passe ne respecte pas les exigences.",
        Language::EsMx => "Esta contraseña no cumple con los requisitos.",
    }
}

fn invalid_parameter(language: Language) -> &'static str {
    match language {
        Language::EnUs => "Some of the information entered is not valid.",
        Language::FrFr => "Certaines informations saisies ne sont pas valides.",
        Language::EsMx => "Parte de la información ingresada no es válida.",
    }
}

fn too_many_requests(language: Language) -> &'static str {
    match language {
        Language::EnUs => "Too many requests. Please try again later.",
        Language::FrFr => "Trop de requêtes. Veuillez réessayer plus tard.",
        Language::EsMx => "Demasiadas solicitudes. Inténtalo más tarde.",
    }
}

impl Localize for SignInError {
    fn user_message(&self, language: Language) -> String {
        match self {
            SignInError::IncorrectCredentials => match language {
                Language::EnUs => "The password you entered is incorrect.",
                Language::FrFr => "Le mot de passe saisi est incorrect.",
                Language::EsMx => "La contraseña que ingresaste es incorrecta.",
            }
            .to_owned(),
            SignInError::UserNotFound => no_account(language).to_owned(),
            SignInError::Other(err) => fallback(err, language),
        }
    }
}

impl Localize for SignUpError {
    fn user_message(&self, language: Language) -> String {
        match self {
            SignUpError::EmailExists => match language {
                Language::EnUs => "An account with this email already exists.",
                Language::FrFr => "Un compte avec cet e-mail existe déjà.",
                Language::EsMx => "Ya existe una cuenta con este correo electrónico.",
            }
            .to_owned(),
            SignUpError::WeakPassword => weak_password(language).to_owned(),
            SignUpError::InvalidParameter => invalid_parameter(language).to_owned(),
            SignUpError::TooManyRequests => too_many_requests(language).to_owned(),
            SignUpError::SignIn(inner) => inner.user_message(language),
            SignUpError::Other(err) => fallback(err, language),
        }
    }
}

impl Localize for ResetRequestError {
    fn user_message(&self, language: Language) -> String {
        match self {
            ResetRequestError::UserNotFound => no_account(language).to_owned(),
            ResetRequestError::AttemptLimitExceeded => attempt_limit(language).to_owned(),
            ResetRequestError::Other(err) => fallback(err, language),
        }
    }
}

impl Localize for ResetConfirmError {
    fn user_message(&self, language: Language) -> String {
        match self {
            ResetConfirmError::InvalidCode => invalid_code(language).to_owned(),
            ResetConfirmError::ExpiredCode => expired_code(language).to_owned(),
            ResetConfirmError::UserNotFound => no_account(language).to_owned(),
            ResetConfirmError::AttemptLimitExceeded => attempt_limit(language).to_owned(),
            ResetConfirmError::WeakPassword => weak_password(language).to_owned(),
            ResetConfirmError::Other(err) => fallback(err, language),
        }
    }
}

impl Localize for VerifyError {
    fn user_message(&self, language: Language) -> String {
        match self {
            VerifyError::CodeMismatch => invalid_code(language).to_owned(),
            VerifyError::ExpiredCode => expired_code(language).to_owned(),
            VerifyError::NotAuthorized => match language {
                Language::EnUs => {
                    "You are not authorized to verify this email. Please log in and try again."
                }
                Language::FrFr => {
                    "Vous n'êtes pas autorisé à vérifier cet e-mail. Veuillez vous connecter et réessayer."
                }
                Language::EsMx => {
                    "No estás autorizado para verificar este correo electrónico. Inicia sesión e inténtalo de nuevo."
                }
            }
            .to_owned(),
            VerifyError::UserNotFound => no_account(language).to_owned(),
            VerifyError::Other(err) => fallback(err, language),
        }
    }
}

impl Localize for ResendError {
    fn user_message(&self, language: Language) -> String {
        match self {
            ResendError::NotLoggedIn => match language {
                Language::EnUs => "Unable to send verification code. User is not logged in.",
                Language::FrFr => {
                    "Impossible d'envoyer le code de vérification. L'utilisateur n'est pas connecté."
                }
                Language::EsMx => {
                    "No se pudo enviar el código de verificación. El usuario no ha iniciado sesión."
                }
            }
            .to_owned(),
            ResendError::LimitExceeded => attempt_limit(language).to_owned(),
            ResendError::NotAuthorized => match language {
                Language::EnUs => {
                    "You are not authorized to request a verification code. Please log in and try again."
                }
                Language::FrFr => {
                    "Vous n'êtes pas autorisé à demander un code de vérification. Veuillez vous connecter et réessayer."
                }
                Language::EsMx => {
                    "No estás autorizado para solicitar un código de verificación. Inicia sesión e inténtalo de nuevo."
                }
            }
            .to_owned(),
            ResendError::UserNotFound => no_account(language).to_owned(),
            ResendError::Other(err) => fallback(err, language),
        }
    }
}

impl Localize for FetchProfileError {
    fn user_message(&self, language: Language) -> String {
        match self {
            FetchProfileError::UserNotFound => no_account(language).to_owned(),
            FetchProfileError::InvalidParameter => invalid_parameter(language).to_owned(),
            FetchProfileError::TooManyRequests => too_many_requests(language).to_owned(),
            FetchProfileError::Other(err) => fallback(err, language),
        }
    }
}

impl Localize for UpdateProfileError {
    fn user_message(&self, language: Language) -> String {
        match self {
            UpdateProfileError::UserNotFound => no_account(language).to_owned(),
            UpdateProfileError::InvalidParameter => invalid_parameter(language).to_owned(),
            UpdateProfileError::NotAuthorized => match language {
                Language::EnUs => "You are not authorized to update this profile.",
                Language::FrFr => "Vous n'êtes pas autorisé à modifier ce profil.",
                Language::EsMx => "No estás autorizado para actualizar este perfil.",
            }
            .to_owned(),
            UpdateProfileError::Other(err) => fallback(err, language),
        }
    }
}
