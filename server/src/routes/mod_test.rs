use axum::body::Body;
use axum::http::Request;
use tower::ServiceExt;

use super::*;
use crate::state::test_helpers::{test_app_state, test_config};

#[tokio::test]
async fn healthz_returns_ok() {
    assert_eq!(healthz().await, StatusCode::OK);
}

#[tokio::test]
async fn api_routes_serve_healthz() {
    let app = api_routes(test_app_state());
    let resp = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn me_without_token_is_unauthorized_on_both_paths() {
    for path in ["/auth/me", "/api/auth/me"] {
        let app = api_routes(test_app_state());
        let resp = app
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{path}");
    }
}

#[tokio::test]
async fn kakao_routes_unavailable_without_config() {
    for path in ["/auth/kakao", "/api/auth/kakao/callback", "/auth/kakao/callback?code=x&state=y"] {
        let app = api_routes(test_app_state());
        let resp = app
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE, "{path}");
    }
}

#[tokio::test]
async fn login_without_password_field_is_rejected() {
    let app = api_routes(test_app_state());
    let resp = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("email=alice%40example.com"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn cors_preflight_allows_frontend_with_credentials() {
    let app = api_routes(test_app_state());
    let resp = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/auth/login")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = resp.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "http://localhost:3000");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}

#[test]
fn cors_layer_tolerates_invalid_origin() {
    let mut config = test_config();
    config.frontend_url = "http://bad\norigin".to_owned();
    drop(cors_layer(&config));
}
