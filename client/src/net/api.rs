//! REST API helpers for communicating with the auth server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`Result` outputs instead of panics so a failed login
//! surfaces as a message on the form rather than a crashed hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{SignUpRequest, TokenResponse, User};
use crate::state::login_form::Credentials;

/// Login-or-signup endpoint; accepts a form-encoded body.
pub const LOGIN_ENDPOINT: &str = "/auth/login";
pub const ME_ENDPOINT: &str = "/auth/me";
pub const LOGOUT_ENDPOINT: &str = "/api/auth/logout";

#[cfg(any(test, feature = "hydrate"))]
fn request_failed_message(action: &str, status: u16, detail: &str) -> String {
    let detail = detail.trim();
    if detail.is_empty() {
        format!("{action} failed: {status}")
    } else {
        format!("{action} failed: {status} {detail}")
    }
}

/// Form fields sent to [`LOGIN_ENDPOINT`]. The nickname is only sent by sign-up.
#[cfg(any(test, feature = "hydrate"))]
fn login_form_fields<'a>(email: &'a str, password: &'a str, nickname: Option<&'a str>) -> Vec<(&'static str, &'a str)> {
    let mut fields = vec![("email", email), ("password", password)];
    if let Some(nickname) = nickname {
        fields.push(("nickname", nickname));
    }
    fields
}

#[cfg(feature = "hydrate")]
async fn post_login_form(action: &str, fields: &[(&str, &str)]) -> Result<TokenResponse, String> {
    let params = web_sys::UrlSearchParams::new().map_err(|e| format!("{e:?}"))?;
    for (name, value) in fields {
        params.append(name, value);
    }
    let resp = gloo_net::http::Request::post(LOGIN_ENDPOINT)
        .body(params)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        let detail = resp.text().await.unwrap_or_default();
        return Err(request_failed_message(action, resp.status(), &detail));
    }
    resp.json::<TokenResponse>().await.map_err(|e| e.to_string())
}

/// Authenticate with the identifier/secret pair from the login form.
///
/// The server sets the `access_token` cookie on success; the returned token
/// is informational.
///
/// # Errors
///
/// Returns an error string if the request fails or the server rejects the
/// credentials.
pub async fn login(credentials: &Credentials) -> Result<TokenResponse, String> {
    #[cfg(feature = "hydrate")]
    {
        let fields = login_form_fields(&credentials.identifier, &credentials.secret, None);
        post_login_form("login", &fields).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(format!("cannot sign in {} outside the browser", credentials.identifier))
    }
}

/// Create an account (or sign in, if the email already exists).
///
/// # Errors
///
/// Returns an error string if the request fails or the server rejects it.
pub async fn sign_up(request: &SignUpRequest) -> Result<TokenResponse, String> {
    #[cfg(feature = "hydrate")]
    {
        let fields = login_form_fields(&request.email, &request.password, Some(&request.nickname));
        post_login_form("sign-up", &fields).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(format!("cannot sign up {} outside the browser", request.email))
    }
}

/// Fetch the currently authenticated user from [`ME_ENDPOINT`].
/// Returns `None` if not authenticated or on the server.
pub async fn fetch_current_user() -> Option<User> {
    #[cfg(feature = "hydrate")]
    {
        let resp = match gloo_net::http::Request::get(ME_ENDPOINT).send().await {
            Ok(resp) if resp.ok() => resp,
            Ok(_) => return None,
            Err(e) => {
                log::warn!("current user probe failed: {e}");
                return None;
            }
        };
        match resp.json::<User>().await {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("malformed {ME_ENDPOINT} response: {e}");
                None
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Clear the auth cookie via [`LOGOUT_ENDPOINT`].
///
/// # Errors
///
/// Returns an error string if the request fails.
pub async fn logout() -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(LOGOUT_ENDPOINT)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("logout", resp.status(), ""));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}
