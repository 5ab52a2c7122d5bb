//! Auth routes — local login-or-signup, Kakao OAuth flow, current user.
//!
//! The access token travels in the `access_token` cookie, which is readable by
//! page scripts so the SPA can forward it as a bearer header when needed.
//! Requests may present the token either way.

use axum::extract::{FromRef, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::config::ServerConfig;
use crate::services::auth::{self as auth_svc, AuthError};
use crate::services::kakao::{self, KakaoApi, KakaoError};
use crate::services::token;
use crate::services::users::{self, UserRecord};
use crate::state::AppState;

pub(crate) const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub(crate) const OAUTH_STATE_COOKIE: &str = "oauth_state";

fn access_token_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, token))
        .path("/")
        .http_only(false)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

fn cleared_cookie(name: &'static str, http_only: bool, secure: bool) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path("/")
        .http_only(http_only)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

/// Token from an `Authorization: Bearer <token>` header, if present.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = raw.trim().split_once(' ')?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }
    Some(token.to_owned())
}

fn issue_token(config: &ServerConfig, user: &UserRecord) -> Result<String, Response> {
    token::create_access_token(&config.jwt_secret, user.id, &user.nickname, config.token_ttl).map_err(|e| {
        tracing::error!(error = %e, user_id = %user.id, "token signing failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to issue token").into_response()
    })
}

pub(crate) fn auth_error_status(err: &AuthError) -> StatusCode {
    match err {
        AuthError::InvalidEmail | AuthError::MissingPassword | AuthError::InvalidCredentials => StatusCode::BAD_REQUEST,
        AuthError::Password(_) | AuthError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn kakao_error_status(err: &KakaoError) -> StatusCode {
    match err {
        KakaoError::TokenExchange(_) | KakaoError::UserInfo(_) => StatusCode::BAD_REQUEST,
        KakaoError::AccountConflict(_) => StatusCode::CONFLICT,
        KakaoError::Config(_) | KakaoError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the bearer header or `access_token` cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: UserRecord,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .or_else(|| {
                CookieJar::from_headers(&parts.headers)
                    .get(ACCESS_TOKEN_COOKIE)
                    .map(|c| c.value().to_owned())
            })
            .filter(|t| !t.is_empty())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let app_state = AppState::from_ref(state);
        let claims = token::verify_access_token(&app_state.config.jwt_secret, &token).map_err(|e| {
            tracing::debug!(error = %e, "rejected access token");
            StatusCode::UNAUTHORIZED
        })?;
        let user_id = claims.user_id().ok_or(StatusCode::UNAUTHORIZED)?;

        let user = users::find_by_id(&app_state.pool, user_id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "user lookup failed");
                StatusCode::INTERNAL_SERVER_ERROR
            })?
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Self { user })
    }
}

// =============================================================================
// LOCAL LOGIN
// =============================================================================

#[derive(Deserialize)]
pub struct LoginForm {
    email: String,
    password: String,
    nickname: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// `POST /auth/login` — sign in, creating the account on first use.
pub async fn login(State(state): State<AppState>, jar: CookieJar, Form(form): Form<LoginForm>) -> Response {
    let user = match auth_svc::login_or_signup(&state.pool, &form.email, &form.password, form.nickname.as_deref()).await
    {
        Ok(user) => user,
        Err(e) => {
            let status = auth_error_status(&e);
            if status.is_server_error() {
                tracing::error!(error = %e, "login failed");
                return (status, "Login failed").into_response();
            }
            return (status, e.to_string()).into_response();
        }
    };

    let token = match issue_token(&state.config, &user) {
        Ok(token) => token,
        Err(resp) => return resp,
    };

    let jar = jar.add(access_token_cookie(token.clone(), state.config.cookie_secure));
    (jar, Json(TokenResponse { access_token: token, token_type: "bearer" })).into_response()
}

// =============================================================================
// KAKAO OAUTH
// =============================================================================

fn kakao_unavailable() -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, "Kakao OAuth not configured").into_response()
}

/// `GET /auth/kakao` — redirect to the Kakao authorization page.
pub async fn kakao_redirect(State(state): State<AppState>) -> Response {
    let Some(kakao) = &state.kakao else {
        return kakao_unavailable();
    };

    let oauth_state = kakao::generate_state();
    let url = match kakao.authorize_url(&oauth_state) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!(error = %e, "kakao authorize url failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Kakao OAuth misconfigured").into_response();
        }
    };

    let cookie = Cookie::build((OAUTH_STATE_COOKIE, oauth_state))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.cookie_secure)
        .max_age(Duration::minutes(10));

    let jar = CookieJar::new().add(cookie);
    (jar, Redirect::temporary(&url)).into_response()
}

#[derive(Deserialize)]
pub struct KakaoCallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// `GET /auth/kakao/callback` — verify state, exchange code, set cookie, redirect.
pub async fn kakao_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<KakaoCallbackQuery>,
) -> Response {
    let Some(kakao) = state.kakao.clone() else {
        return kakao_unavailable();
    };

    if let Some(error) = params.error {
        tracing::warn!(%error, "kakao authorization denied");
        return (StatusCode::BAD_REQUEST, format!("Kakao login denied: {error}")).into_response();
    }
    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "Missing code").into_response();
    };

    // Verify OAuth CSRF state from cookie.
    let Some(callback_state) = params.state.as_deref() else {
        return (StatusCode::BAD_REQUEST, "missing oauth state").into_response();
    };
    let expected_state = jar.get(OAUTH_STATE_COOKIE).map(Cookie::value).unwrap_or_default();
    if expected_state.is_empty() || expected_state != callback_state {
        return (StatusCode::UNAUTHORIZED, "invalid oauth state").into_response();
    }

    let jar = jar.add(cleared_cookie(OAUTH_STATE_COOKIE, true, state.config.cookie_secure));
    complete_kakao_login(&state, kakao.as_ref(), jar, &code).await
}

#[derive(Deserialize)]
pub struct KakaoCodeForm {
    code: String,
}

/// `POST /auth/kakao/callback` — code posted by a front end that handled the
/// Kakao redirect itself.
pub async fn kakao_callback_form(State(state): State<AppState>, jar: CookieJar, Form(form): Form<KakaoCodeForm>) -> Response {
    let Some(kakao) = state.kakao.clone() else {
        return kakao_unavailable();
    };
    if form.code.is_empty() {
        return (StatusCode::BAD_REQUEST, "Missing code").into_response();
    }
    complete_kakao_login(&state, kakao.as_ref(), jar, &form.code).await
}

async fn complete_kakao_login(state: &AppState, kakao: &dyn KakaoApi, jar: CookieJar, code: &str) -> Response {
    let access_token = match kakao.exchange_code(code).await {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "kakao code exchange failed");
            return (kakao_error_status(&e), "Kakao token issuance failed").into_response();
        }
    };

    let kakao_user = match kakao.fetch_user(&access_token).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!(error = %e, "kakao user fetch failed");
            return (kakao_error_status(&e), "Kakao user info failed").into_response();
        }
    };

    let user = match kakao::find_or_create_user(&state.pool, &kakao_user).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!(error = %e, kakao_id = kakao_user.id, "kakao user lookup failed");
            return (kakao_error_status(&e), "Failed to resolve Kakao account").into_response();
        }
    };
    tracing::info!(user_id = %user.id, "kakao login");

    let token = match issue_token(&state.config, &user) {
        Ok(token) => token,
        Err(resp) => return resp,
    };

    let jar = jar.add(access_token_cookie(token, state.config.cookie_secure));
    (jar, Redirect::to(&state.config.frontend_url)).into_response()
}

// =============================================================================
// SESSION
// =============================================================================

/// `GET /auth/me` — return the current user.
pub async fn me(auth: AuthUser) -> Json<UserRecord> {
    Json(auth.user)
}

/// `POST /api/auth/logout` — clear the token cookie.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let jar = CookieJar::new().add(cleared_cookie(ACCESS_TOKEN_COOKIE, false, state.config.cookie_secure));
    (jar, StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
