use super::*;
use crate::net::types::User;

fn alice() -> User {
    User {
        id: "6f1c1f0e-2a4b-4b59-9a59-0d3c2e1f7a10".to_owned(),
        email: "alice@example.com".to_owned(),
        nickname: "alice".to_owned(),
        provider: "local".to_owned(),
    }
}

#[test]
fn forms_hidden_while_loading() {
    let state = AuthState { user: None, loading: true };
    assert!(!state.should_show_forms());
}

#[test]
fn forms_shown_when_loaded_without_user() {
    let state = AuthState { user: None, loading: false };
    assert!(state.should_show_forms());
}

#[test]
fn forms_hidden_when_user_exists() {
    let state = AuthState { user: Some(alice()), loading: false };
    assert!(!state.should_show_forms());
    assert_eq!(state.display_name(), Some("alice"));
}

#[test]
fn display_name_absent_without_user() {
    assert_eq!(AuthState::default().display_name(), None);
}
