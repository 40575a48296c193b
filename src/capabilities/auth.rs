//! Auth provider capability.
//!
//! Pure data types describing what the shell's auth backend is asked to do
//! and what can come back. The core never talks to the provider directly: it
//! emits [`AuthOperation`]s and consumes `SessionChanged` / `AuthFailed`
//! events the shell derives from the provider's callbacks.

use serde::{Deserialize, Serialize};

use crate::event::Secret;
use crate::MIN_PASSWORD_LEN;

/// How long a successful sign-in should survive on the device.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistenceMode {
    /// Survives browser/app restarts ("remember me").
    Local,
    /// Cleared when the session ends.
    SessionOnly,
}

/// Identity as reported by the auth provider itself, before any profile
/// document has been consulted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthIdentity {
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum AuthOperation {
    /// Subscribe to auth-state changes. The subscription may fire any number
    /// of times over the app's lifetime; each firing fully re-decides the
    /// session.
    Subscribe,
    SignIn {
        email: String,
        password: Secret,
        persistence: PersistenceMode,
    },
    SignUp {
        username: String,
        email: String,
        password: Secret,
    },
    SignOut,
}

impl AuthOperation {
    /// Build a sign-in request, validating the form fields first.
    pub fn sign_in(
        email: &str,
        password: Secret,
        remember: bool,
    ) -> Result<Self, AuthError> {
        validate_email(email)?;
        if password.expose().is_empty() {
            return Err(AuthError::new(AuthErrorCode::InvalidCredential, "empty password"));
        }
        Ok(Self::SignIn {
            email: email.trim().to_string(),
            password,
            persistence: if remember {
                PersistenceMode::Local
            } else {
                PersistenceMode::SessionOnly
            },
        })
    }

    /// Build a sign-up request. Weak passwords are rejected here with the
    /// same code the backend would use, so the form shows one message either
    /// way.
    pub fn sign_up(username: &str, email: &str, password: Secret) -> Result<Self, AuthError> {
        validate_email(email)?;
        if password.expose().chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::new(AuthErrorCode::WeakPassword, "password too short"));
        }
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::new(AuthErrorCode::Other, "empty username"));
        }
        Ok(Self::SignUp {
            username: username.to_string(),
            email: email.trim().to_string(),
            password,
        })
    }
}

fn validate_email(email: &str) -> Result<(), AuthError> {
    let email = email.trim();
    let well_formed = email.contains('@')
        && !email.starts_with('@')
        && !email.ends_with('@')
        && !email.contains(char::is_whitespace);
    if well_formed {
        Ok(())
    } else {
        Err(AuthError::new(AuthErrorCode::InvalidCredential, "malformed email"))
    }
}

/// Which form a failure belongs to; selects the user-facing wording.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthFlow {
    SignIn,
    SignUp,
}

/// Stable failure codes, mirroring the provider's error identifiers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthErrorCode {
    InvalidCredential,
    EmailAlreadyInUse,
    WeakPassword,
    Unavailable,
    Other,
}

impl AuthErrorCode {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidCredential => "auth/invalid-credential",
            Self::EmailAlreadyInUse => "auth/email-already-in-use",
            Self::WeakPassword => "auth/weak-password",
            Self::Unavailable => "auth/unavailable",
            Self::Other => "auth/other",
        }
    }

    /// The short message shown next to the form. Input is retained; these
    /// never escalate past the form itself.
    pub fn user_message(&self, flow: AuthFlow) -> &'static str {
        match (flow, self) {
            (AuthFlow::SignIn, Self::InvalidCredential) => "Invalid email or password.",
            (AuthFlow::SignIn, _) => "Failed to sign in. Please try again.",
            (AuthFlow::SignUp, Self::EmailAlreadyInUse) => "This email is already in use.",
            (AuthFlow::SignUp, Self::WeakPassword) => {
                "Password should be at least 6 characters."
            }
            (AuthFlow::SignUp, _) => "Failed to create account. Please try again.",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{}: {detail}", code.code())]
pub struct AuthError {
    pub code: AuthErrorCode,
    pub detail: String,
}

impl AuthError {
    pub fn new(code: AuthErrorCode, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_builder_valid() {
        let op = AuthOperation::sign_in("a@b.com", Secret::new("password123"), true).unwrap();
        match op {
            AuthOperation::SignIn { email, persistence, .. } => {
                assert_eq!(email, "a@b.com");
                assert_eq!(persistence, PersistenceMode::Local);
            }
            _ => panic!("wrong operation"),
        }
    }

    #[test]
    fn test_sign_in_session_only_when_not_remembered() {
        let op = AuthOperation::sign_in("a@b.com", Secret::new("pw"), false).unwrap();
        assert!(matches!(
            op,
            AuthOperation::SignIn { persistence: PersistenceMode::SessionOnly, .. }
        ));
    }

    #[test]
    fn test_sign_in_rejects_bad_email() {
        for email in ["", "no-at-sign", "@leading", "trailing@", "spa ce@x.com"] {
            let err = AuthOperation::sign_in(email, Secret::new("pw"), true).unwrap_err();
            assert_eq!(err.code, AuthErrorCode::InvalidCredential);
        }
    }

    #[test]
    fn test_sign_in_rejects_empty_password() {
        let err = AuthOperation::sign_in("a@b.com", Secret::new(""), true).unwrap_err();
        assert_eq!(err.code, AuthErrorCode::InvalidCredential);
    }

    #[test]
    fn test_sign_up_rejects_weak_password() {
        let err = AuthOperation::sign_up("Explorer", "a@b.com", Secret::new("12345")).unwrap_err();
        assert_eq!(err.code, AuthErrorCode::WeakPassword);
        assert_eq!(
            err.code.user_message(AuthFlow::SignUp),
            "Password should be at least 6 characters."
        );
    }

    #[test]
    fn test_sign_up_trims_username() {
        let op = AuthOperation::sign_up("  Explorer ", "a@b.com", Secret::new("123456")).unwrap();
        assert!(matches!(op, AuthOperation::SignUp { username, .. } if username == "Explorer"));
    }

    #[test]
    fn test_user_messages_per_flow() {
        assert_eq!(
            AuthErrorCode::InvalidCredential.user_message(AuthFlow::SignIn),
            "Invalid email or password."
        );
        assert_eq!(
            AuthErrorCode::EmailAlreadyInUse.user_message(AuthFlow::SignUp),
            "This email is already in use."
        );
        assert_eq!(
            AuthErrorCode::Unavailable.user_message(AuthFlow::SignIn),
            "Failed to sign in. Please try again."
        );
    }

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(AuthErrorCode::InvalidCredential.code(), "auth/invalid-credential");
        assert_eq!(AuthErrorCode::EmailAlreadyInUse.code(), "auth/email-already-in-use");
        assert_eq!(AuthErrorCode::WeakPassword.code(), "auth/weak-password");
    }

    #[test]
    fn test_password_not_in_debug_output() {
        let op = AuthOperation::sign_in("a@b.com", Secret::new("hunter22"), true).unwrap();
        let debug = format!("{op:?}");
        assert!(!debug.contains("hunter22"));
    }
}
