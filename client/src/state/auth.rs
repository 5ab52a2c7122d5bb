//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthPage` fills this after a successful login or after hydration (cookie
//! already present), and uses it to decide between the signed-in panel and the forms.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl AuthState {
    /// Show the login/sign-up forms only once we know nobody is signed in.
    #[must_use]
    pub fn should_show_forms(&self) -> bool {
        !self.loading && self.user.is_none()
    }

    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.nickname.as_str())
    }
}
