//! Local email/password login that doubles as sign-up.
//!
//! An unknown email creates a `local` account with the submitted password;
//! a known email must present a matching password. Accounts created through
//! Kakao have no password and cannot sign in here.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use sqlx::PgPool;

use super::password::{self, PasswordError};
use super::users::{self, NewUser, Provider, UserRecord};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email")]
    InvalidEmail,
    #[error("password required")]
    MissingPassword,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Trim and sanity-check an email. Requires exactly one `@` with text on both
/// sides, which also keeps local accounts out of the `kakao_<id>` namespace.
#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(normalized.to_owned())
}

/// Nickname for a new account: the submitted one, else the email local part.
#[must_use]
pub fn resolve_nickname(email: &str, nickname: Option<&str>) -> String {
    if let Some(nickname) = nickname.map(str::trim).filter(|n| !n.is_empty()) {
        return nickname.to_owned();
    }
    email
        .split('@')
        .next()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("user")
        .to_owned()
}

async fn check_password(user: UserRecord, password: &str) -> Result<UserRecord, AuthError> {
    let Some(hash) = user.password_hash.clone() else {
        return Err(AuthError::InvalidCredentials);
    };
    if password::spawn_verify_password(password.to_owned(), hash).await {
        Ok(user)
    } else {
        Err(AuthError::InvalidCredentials)
    }
}

/// Sign in `email`, creating the account first if it does not exist.
///
/// # Errors
///
/// - [`AuthError::InvalidEmail`] / [`AuthError::MissingPassword`] for bad input
/// - [`AuthError::InvalidCredentials`] when the password does not match or the
///   account has no password
/// - [`AuthError::Db`] / [`AuthError::Password`] on infrastructure failure
pub async fn login_or_signup(
    pool: &PgPool,
    email: &str,
    password: &str,
    nickname: Option<&str>,
) -> Result<UserRecord, AuthError> {
    let email = normalize_email(email).ok_or(AuthError::InvalidEmail)?;
    if password.is_empty() {
        return Err(AuthError::MissingPassword);
    }

    if let Some(user) = users::find_by_email(pool, &email).await? {
        return check_password(user, password).await;
    }

    let password_hash = password::spawn_hash_password(password.to_owned()).await?;
    let nickname = resolve_nickname(&email, nickname);
    let new_user = NewUser {
        email: &email,
        password_hash: Some(&password_hash),
        nickname: &nickname,
        provider: Provider::Local,
    };

    match users::create_user(pool, &new_user).await? {
        Some(user) => {
            tracing::info!(user_id = %user.id, "local account created");
            Ok(user)
        }
        // Lost a race with a concurrent sign-up for the same email.
        None => {
            let user = users::find_by_email(pool, &email)
                .await?
                .ok_or(AuthError::InvalidCredentials)?;
            check_password(user, password).await
        }
    }
}
