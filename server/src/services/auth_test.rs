use super::*;
use crate::state::test_helpers;

// =============================================================================
// normalize_email
// =============================================================================

#[test]
fn normalize_email_trims() {
    assert_eq!(normalize_email("  alice@example.com "), Some("alice@example.com".to_owned()));
}

#[test]
fn normalize_email_rejects_malformed() {
    for email in ["", "   ", "alice", "@example.com", "alice@", "a@b@c"] {
        assert_eq!(normalize_email(email), None, "{email:?}");
    }
}

#[test]
fn normalize_email_rejects_kakao_namespace() {
    assert_eq!(normalize_email("kakao_12345"), None);
}

// =============================================================================
// resolve_nickname
// =============================================================================

#[test]
fn resolve_nickname_prefers_submitted_value() {
    assert_eq!(resolve_nickname("alice@example.com", Some("  Ali ")), "Ali");
}

#[test]
fn resolve_nickname_falls_back_to_local_part() {
    assert_eq!(resolve_nickname("alice@example.com", None), "alice");
    assert_eq!(resolve_nickname("alice@example.com", Some("   ")), "alice");
}

// =============================================================================
// check_password
// =============================================================================

fn record(password_hash: Option<String>) -> UserRecord {
    UserRecord {
        id: uuid::Uuid::new_v4(),
        email: "alice@example.com".to_owned(),
        password_hash,
        nickname: "alice".to_owned(),
        provider: "local".to_owned(),
    }
}

#[tokio::test]
async fn check_password_accepts_match() {
    let hash = password::hash_password("pw1").unwrap();
    assert!(check_password(record(Some(hash)), "pw1").await.is_ok());
}

#[tokio::test]
async fn check_password_rejects_mismatch() {
    let hash = password::hash_password("pw1").unwrap();
    assert!(matches!(check_password(record(Some(hash)), "pw2").await, Err(AuthError::InvalidCredentials)));
}

#[tokio::test]
async fn check_password_rejects_passwordless_account() {
    assert!(matches!(check_password(record(None), "anything").await, Err(AuthError::InvalidCredentials)));
}

// =============================================================================
// login_or_signup input validation (short-circuits before the pool is used)
// =============================================================================

#[tokio::test]
async fn login_rejects_bad_email_before_touching_db() {
    let state = test_helpers::test_app_state();
    let err = login_or_signup(&state.pool, "not-an-email", "pw1", None).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidEmail));
}

#[tokio::test]
async fn login_rejects_empty_password_before_touching_db() {
    let state = test_helpers::test_app_state();
    let err = login_or_signup(&state.pool, "alice@example.com", "", None).await.unwrap_err();
    assert!(matches!(err, AuthError::MissingPassword));
}

// =============================================================================
// Live database (opt-in: `--features live-db-tests`, needs DATABASE_URL)
// =============================================================================

#[cfg(feature = "live-db-tests")]
mod live {
    use super::*;

    fn unique_email() -> String {
        format!("live-{}@example.com", uuid::Uuid::new_v4())
    }

    #[tokio::test]
    async fn first_login_creates_account_then_requires_same_password() {
        let pool = test_helpers::live_pool().await;
        let email = unique_email();

        let created = login_or_signup(&pool, &email, "pw1", Some("Live")).await.unwrap();
        assert_eq!(created.nickname, "Live");
        assert_eq!(created.provider, "local");

        let again = login_or_signup(&pool, &email, "pw1", None).await.unwrap();
        assert_eq!(again.id, created.id);

        let wrong = login_or_signup(&pool, &email, "pw2", None).await.unwrap_err();
        assert!(matches!(wrong, AuthError::InvalidCredentials));
    }
}
