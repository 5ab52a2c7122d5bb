//! Kakao OAuth service — authorize URL, code exchange, profile fetch, user lookup.
//!
//! DESIGN
//! ======
//! HTTP calls sit behind the [`KakaoApi`] trait so route handlers can be
//! exercised with a mock provider. Kakao accounts are stored under the
//! synthetic email `kakao_<id>` with no password.

#[cfg(test)]
#[path = "kakao_test.rs"]
mod kakao_test;

use std::fmt::Write;

use rand::Rng;
use serde::Deserialize;
use sqlx::PgPool;

use super::users::{self, NewUser, Provider, UserRecord};

const KAKAO_AUTHORIZE_URL: &str = "https://kauth.kakao.com/oauth/authorize";
const KAKAO_TOKEN_URL: &str = "https://kauth.kakao.com/oauth/token";
const KAKAO_USER_URL: &str = "https://kapi.kakao.com/v2/user/me";

/// Kakao OAuth configuration loaded from environment.
#[derive(Debug, Clone)]
pub struct KakaoConfig {
    pub client_id: String,
    /// Only sent when the Kakao app has client-secret enforcement enabled.
    pub client_secret: Option<String>,
    pub redirect_uri: String,
}

impl KakaoConfig {
    /// Load from `KAKAO_CLIENT_ID`, `KAKAO_REDIRECT_URI` and optional
    /// `KAKAO_CLIENT_SECRET`. Returns `None` if a required key is missing
    /// (Kakao login will be disabled).
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    #[must_use]
    pub fn from_lookup<L>(lookup: L) -> Option<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let client_id = non_empty("KAKAO_CLIENT_ID")?;
        let redirect_uri = non_empty("KAKAO_REDIRECT_URI")?;
        let client_secret = non_empty("KAKAO_CLIENT_SECRET");
        Some(Self { client_id, client_secret, redirect_uri })
    }

    /// Build the Kakao authorization URL carrying the CSRF `state`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be assembled.
    pub fn authorize_url(&self, state: &str) -> Result<String, KakaoError> {
        let params = [
            ("response_type", "code"),
            ("client_id", self.client_id.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("state", state),
        ];
        reqwest::Url::parse_with_params(KAKAO_AUTHORIZE_URL, &params)
            .map(String::from)
            .map_err(|e| KakaoError::Config(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KakaoProperties {
    pub nickname: Option<String>,
}

/// Subset of `GET /v2/user/me`.
#[derive(Debug, Clone, Deserialize)]
pub struct KakaoUser {
    pub id: i64,
    #[serde(default)]
    pub properties: Option<KakaoProperties>,
}

impl KakaoUser {
    /// Local email under which this Kakao account is stored.
    #[must_use]
    pub fn synthetic_email(&self) -> String {
        format!("kakao_{}", self.id)
    }

    /// Profile nickname, or the synthetic email when the profile has none.
    #[must_use]
    pub fn nickname(&self) -> String {
        self.properties
            .as_ref()
            .and_then(|p| p.nickname.as_deref())
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map_or_else(|| self.synthetic_email(), str::to_owned)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KakaoError {
    #[error("kakao configuration error: {0}")]
    Config(String),
    #[error("kakao token exchange failed: {0}")]
    TokenExchange(String),
    #[error("kakao user info failed: {0}")]
    UserInfo(String),
    #[error("email {0} belongs to a non-kakao account")]
    AccountConflict(String),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Provider-neutral Kakao operations. Enables mocking in tests.
#[async_trait::async_trait]
pub trait KakaoApi: Send + Sync {
    /// Authorization URL the browser is redirected to.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be assembled.
    fn authorize_url(&self, state: &str) -> Result<String, KakaoError>;

    /// Exchange an authorization code for a Kakao access token.
    async fn exchange_code(&self, code: &str) -> Result<String, KakaoError>;

    /// Fetch the profile of the user who owns `access_token`.
    async fn fetch_user(&self, access_token: &str) -> Result<KakaoUser, KakaoError>;
}

/// [`KakaoApi`] backed by the real Kakao endpoints.
pub struct KakaoClient {
    config: KakaoConfig,
    http: reqwest::Client,
}

impl KakaoClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: KakaoConfig) -> Result<Self, KakaoError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| KakaoError::Config(e.to_string()))?;
        Ok(Self { config, http })
    }
}

#[async_trait::async_trait]
impl KakaoApi for KakaoClient {
    fn authorize_url(&self, state: &str) -> Result<String, KakaoError> {
        self.config.authorize_url(state)
    }

    async fn exchange_code(&self, code: &str) -> Result<String, KakaoError> {
        let mut form = vec![
            ("grant_type", "authorization_code"),
            ("client_id", self.config.client_id.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("code", code),
        ];
        if let Some(secret) = &self.config.client_secret {
            form.push(("client_secret", secret.as_str()));
        }

        let resp = self
            .http
            .post(KAKAO_TOKEN_URL)
            .form(&form)
            .send()
            .await
            .map_err(|e| KakaoError::TokenExchange(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| KakaoError::TokenExchange(e.to_string()))?;
        if !status.is_success() {
            return Err(KakaoError::TokenExchange(format!("{status}: {body}")));
        }
        let token_resp: TokenResponse = serde_json::from_str(&body)
            .map_err(|_| KakaoError::TokenExchange(format!("unexpected response: {body}")))?;
        Ok(token_resp.access_token)
    }

    async fn fetch_user(&self, access_token: &str) -> Result<KakaoUser, KakaoError> {
        let resp = self
            .http
            .get(KAKAO_USER_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| KakaoError::UserInfo(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(KakaoError::UserInfo(format!("{status}: {body}")));
        }

        resp.json::<KakaoUser>()
            .await
            .map_err(|e| KakaoError::UserInfo(e.to_string()))
    }
}

/// Find the local account for a Kakao profile, creating it on first login.
///
/// # Errors
///
/// Returns [`KakaoError::AccountConflict`] if the synthetic email is held by a
/// non-Kakao account, or [`KakaoError::Db`] on database failure.
pub async fn find_or_create_user(pool: &PgPool, kakao_user: &KakaoUser) -> Result<UserRecord, KakaoError> {
    let email = kakao_user.synthetic_email();
    let nickname = kakao_user.nickname();
    let new_user = NewUser { email: &email, password_hash: None, nickname: &nickname, provider: Provider::Kakao };

    let user = users::find_or_create(pool, &new_user).await?;
    if user.provider != Provider::Kakao.as_str() {
        return Err(KakaoError::AccountConflict(email));
    }
    Ok(user)
}

/// Random 32-byte hex value for the OAuth `state` parameter.
#[must_use]
pub fn generate_state() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        // Writing to a String cannot fail.
        let _ = write!(s, "{b:02x}");
    }
    s
}
