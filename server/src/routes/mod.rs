//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the auth endpoints and stitches them with Leptos SSR
//! rendering under a single Axum router. The login page is served at `/`.

pub mod auth;

use std::path::PathBuf;

use axum::Router;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use client::state::login_form::IdentityProviderUrl;

use crate::config::ServerConfig;
use crate::state::AppState;

/// CORS for a separately hosted front end. Credentials are allowed, so the
/// origin must be exact rather than a wildcard.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    match HeaderValue::from_str(&config.frontend_url) {
        Ok(origin) => cors.allow_origin(AllowOrigin::exact(origin)),
        Err(e) => {
            tracing::warn!(error = %e, url = %config.frontend_url, "FRONTEND_URL is not a valid origin; CORS disabled");
            cors
        }
    }
}

/// Auth API routes, usable on their own when the Leptos site is unavailable.
pub fn api_routes(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/auth/login", axum::routing::post(auth::login))
        .route("/auth/kakao", get(auth::kakao_redirect))
        .route("/api/auth/kakao/callback", get(auth::kakao_redirect))
        .route("/auth/kakao/callback", get(auth::kakao_callback).post(auth::kakao_callback_form))
        .route("/auth/me", get(auth::me))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/logout", axum::routing::post(auth::logout))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Leptos SSR frontend plus the auth API.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[workspace.metadata.leptos]` section).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);
    let identity_provider_url = state.config.identity_provider_login_url.clone();

    let leptos_router = Router::new()
        .leptos_routes_with_context(
            &leptos_options,
            routes,
            move || provide_context(IdentityProviderUrl(identity_provider_url.clone())),
            {
                let opts = leptos_options.clone();
                move || client::app::shell(opts.clone())
            },
        )
        .with_state(leptos_options.clone());

    // Serve Leptos static assets (WASM, CSS, JS) from the site root /pkg directory.
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg"))))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
