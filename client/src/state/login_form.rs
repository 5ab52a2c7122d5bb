//! Headless login-form state and the actions it emits.
//!
//! DESIGN
//! ======
//! `LoginFormCore` holds everything the login form knows without touching the
//! DOM, so it can be tested natively. Every user gesture maps to one method
//! returning a [`LoginAction`]; the rendering layer hands that action to a
//! [`LoginHost`], which owns the side effects (authentication collaborator,
//! browser navigation, parent callbacks).
//!
//! The native `required` attribute blocks empty submissions in the browser.
//! `submit` applies the same rule so non-browser hosts get an identical
//! guarantee.

#[cfg(test)]
#[path = "login_form_test.rs"]
mod login_form_test;

use serde::Serialize;

/// Identity-provider entry point used when the host does not configure one.
pub const DEFAULT_IDENTITY_PROVIDER_URL: &str = "/auth/kakao";

/// `<meta name=..>` carrying the identity-provider URL from the server render
/// to the hydrating client.
pub const IDENTITY_PROVIDER_META_NAME: &str = "identity-provider-url";

/// Identity-provider login URL supplied through Leptos context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentityProviderUrl(pub String);

impl IdentityProviderUrl {
    /// Configured URL, or [`DEFAULT_IDENTITY_PROVIDER_URL`] when absent or blank.
    #[must_use]
    pub fn resolve(configured: Option<String>) -> Self {
        let url = configured
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_IDENTITY_PROVIDER_URL.to_owned());
        Self(url)
    }
}

/// Submission payload handed to the authentication collaborator.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Account identifier as typed.
    pub identifier: String,
    /// Credential as typed.
    pub secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// A required input of the login form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Identifier,
    Secret,
}

impl Field {
    /// DOM id of the input bound to this field.
    #[must_use]
    pub fn input_id(self) -> &'static str {
        match self {
            Self::Identifier => "login-identifier",
            Self::Secret => "login-secret",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Identifier => "Email",
            Self::Secret => "Password",
        }
    }

    /// `type` attribute of the input. The server keys accounts by email.
    #[must_use]
    pub fn input_type(self) -> &'static str {
        match self {
            Self::Identifier => "email",
            Self::Secret => "password",
        }
    }

    #[must_use]
    pub fn autocomplete(self) -> &'static str {
        match self {
            Self::Identifier => "email",
            Self::Secret => "current-password",
        }
    }
}

/// The two user-editable values of one mounted form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginFormState {
    pub identifier: String,
    pub secret: String,
}

/// Outcome of a user gesture, for the host to carry out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginAction {
    /// Forward credentials to the authentication collaborator.
    Authenticate(Credentials),
    /// Submission refused; the named field is empty.
    Blocked(Field),
    /// Replace the current document with this URL.
    Navigate(String),
    /// Ask the parent to switch to the sign-up view.
    SignUpRequested,
}

/// Side effects the login form needs from whatever renders it.
pub trait LoginHost {
    /// Hand the payload to the external authentication collaborator.
    fn authenticate(&self, credentials: Credentials);
    /// Perform a full-document navigation.
    fn navigate(&self, url: &str);
    /// Notify the parent that the user wants to create an account.
    fn request_sign_up(&self);
}

impl LoginAction {
    /// Carry out this action against `host`. `Blocked` is a no-op.
    pub fn dispatch(self, host: &impl LoginHost) {
        match self {
            Self::Authenticate(credentials) => host.authenticate(credentials),
            Self::Navigate(url) => host.navigate(&url),
            Self::SignUpRequested => host.request_sign_up(),
            Self::Blocked(_) => {}
        }
    }
}

/// Login-form logic independent of the browser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginFormCore {
    fields: LoginFormState,
    identity_provider_url: String,
}

impl Default for LoginFormCore {
    fn default() -> Self {
        Self::new(DEFAULT_IDENTITY_PROVIDER_URL)
    }
}

impl LoginFormCore {
    #[must_use]
    pub fn new(identity_provider_url: impl Into<String>) -> Self {
        Self { fields: LoginFormState::default(), identity_provider_url: identity_provider_url.into() }
    }

    // --- Field edits ---

    /// Replace the identifier verbatim.
    pub fn set_identifier(&mut self, value: String) {
        self.fields.identifier = value;
    }

    /// Replace the secret verbatim.
    pub fn set_secret(&mut self, value: String) {
        self.fields.secret = value;
    }

    // --- Queries ---

    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.fields.identifier
    }

    #[must_use]
    pub fn secret(&self) -> &str {
        &self.fields.secret
    }

    #[must_use]
    pub fn identity_provider_url(&self) -> &str {
        &self.identity_provider_url
    }

    /// First empty required field in document order, if any.
    #[must_use]
    pub fn missing_field(&self) -> Option<Field> {
        if self.fields.identifier.is_empty() {
            Some(Field::Identifier)
        } else if self.fields.secret.is_empty() {
            Some(Field::Secret)
        } else {
            None
        }
    }

    // --- Gestures ---

    /// Package the current fields for the authentication collaborator.
    #[must_use]
    pub fn submit(&self) -> LoginAction {
        match self.missing_field() {
            Some(field) => LoginAction::Blocked(field),
            None => LoginAction::Authenticate(Credentials {
                identifier: self.fields.identifier.clone(),
                secret: self.fields.secret.clone(),
            }),
        }
    }

    /// Start the third-party login handshake. Field state is ignored.
    #[must_use]
    pub fn login_with_identity_provider(&self) -> LoginAction {
        LoginAction::Navigate(self.identity_provider_url.clone())
    }

    #[must_use]
    pub fn request_sign_up(&self) -> LoginAction {
        LoginAction::SignUpRequested
    }
}
