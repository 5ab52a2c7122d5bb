//! User rows: lookup and creation.

use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// How an account authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Local,
    Kakao,
}

impl Provider {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Kakao => "kakao",
        }
    }
}

/// A row of the `users` table.
#[derive(Debug, Clone, Serialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    #[serde(skip)]
    pub password_hash: Option<String>,
    pub nickname: String,
    pub provider: String,
}

impl UserRecord {
    fn from_row(row: &PgRow) -> Self {
        Self {
            id: row.get("id"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            nickname: row.get("nickname"),
            provider: row.get("provider"),
        }
    }
}

/// Fields for a new account.
#[derive(Debug)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: Option<&'a str>,
    pub nickname: &'a str,
    pub provider: Provider,
}

const USER_COLUMNS: &str = "id, email, password_hash, nickname, provider";

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRecord>, sqlx::Error> {
    let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row.as_ref().map(UserRecord::from_row))
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRecord>, sqlx::Error> {
    let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.as_ref().map(UserRecord::from_row))
}

/// Insert a user unless the email is taken. Returns `None` on conflict.
pub async fn create_user(pool: &PgPool, user: &NewUser<'_>) -> Result<Option<UserRecord>, sqlx::Error> {
    let row = sqlx::query(&format!(
        "INSERT INTO users (email, password_hash, nickname, provider)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (email) DO NOTHING
         RETURNING {USER_COLUMNS}"
    ))
    .bind(user.email)
    .bind(user.password_hash)
    .bind(user.nickname)
    .bind(user.provider.as_str())
    .fetch_optional(pool)
    .await?;
    Ok(row.as_ref().map(UserRecord::from_row))
}

/// Return the existing user for `email`, creating it first if absent.
pub async fn find_or_create(pool: &PgPool, user: &NewUser<'_>) -> Result<UserRecord, sqlx::Error> {
    let row = sqlx::query(&format!(
        "INSERT INTO users (email, password_hash, nickname, provider)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (email) DO UPDATE SET email = users.email
         RETURNING {USER_COLUMNS}"
    ))
    .bind(user.email)
    .bind(user.password_hash)
    .bind(user.nickname)
    .bind(user.provider.as_str())
    .fetch_one(pool)
    .await?;
    Ok(UserRecord::from_row(&row))
}
