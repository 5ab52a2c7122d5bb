use super::*;

const SECRET: &str = "test-secret";

#[test]
fn issued_token_verifies_with_same_secret() {
    let user_id = Uuid::new_v4();
    let token = create_access_token(SECRET, user_id, "alice", Duration::minutes(5)).unwrap();
    let claims = verify_access_token(SECRET, &token).unwrap();
    assert_eq!(claims.user_id(), Some(user_id));
    assert_eq!(claims.nickname, "alice");
}

#[test]
fn token_has_three_segments() {
    let token = create_access_token(SECRET, Uuid::new_v4(), "alice", Duration::minutes(5)).unwrap();
    assert_eq!(token.split('.').count(), 3);
}

#[test]
fn other_secret_rejected() {
    let token = create_access_token(SECRET, Uuid::new_v4(), "alice", Duration::minutes(5)).unwrap();
    assert!(matches!(verify_access_token("other-secret", &token), Err(TokenError::Invalid(_))));
}

#[test]
fn expired_token_rejected() {
    let token = create_access_token(SECRET, Uuid::new_v4(), "alice", Duration::minutes(-1)).unwrap();
    assert!(matches!(verify_access_token(SECRET, &token), Err(TokenError::Expired)));
}

#[test]
fn garbage_rejected() {
    assert!(verify_access_token(SECRET, "not.a.jwt").is_err());
    assert!(verify_access_token(SECRET, "").is_err());
}

#[test]
fn expiry_tracks_ttl() {
    let before = OffsetDateTime::now_utc().unix_timestamp();
    let token = create_access_token(SECRET, Uuid::new_v4(), "alice", Duration::minutes(60)).unwrap();
    let claims = verify_access_token(SECRET, &token).unwrap();
    assert!(claims.exp >= before + 3600);
    assert!(claims.exp <= before + 3601 + 5);
}

#[test]
fn non_uuid_subject_has_no_user_id() {
    let claims = Claims { sub: "42".to_owned(), nickname: "x".to_owned(), exp: 0 };
    assert_eq!(claims.user_id(), None);
}
