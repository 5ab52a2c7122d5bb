use super::*;

#[test]
fn request_failed_message_includes_detail() {
    assert_eq!(request_failed_message("login", 400, "Invalid credentials"), "login failed: 400 Invalid credentials");
}

#[test]
fn request_failed_message_without_detail() {
    assert_eq!(request_failed_message("logout", 500, "  "), "logout failed: 500");
}

#[test]
fn login_fields_map_identifier_to_email() {
    let fields = login_form_fields("alice", "pw1", None);
    assert_eq!(fields, vec![("email", "alice"), ("password", "pw1")]);
}

#[test]
fn sign_up_fields_include_nickname() {
    let fields = login_form_fields("a@b.com", "pw1", Some("Ali"));
    assert_eq!(fields, vec![("email", "a@b.com"), ("password", "pw1"), ("nickname", "Ali")]);
}

#[test]
fn endpoints_match_server_routes() {
    assert_eq!(LOGIN_ENDPOINT, "/auth/login");
    assert_eq!(ME_ENDPOINT, "/auth/me");
    assert_eq!(LOGOUT_ENDPOINT, "/api/auth/logout");
}
