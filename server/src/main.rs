mod config;
mod db;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use services::kakao::{KakaoApi, KakaoClient, KakaoConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e.into());
        }
    }
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env()?;
    let pool = db::init_pool(&config.database_url, config.db_max_connections).await?;

    // Kakao login is optional: the local form keeps working without it.
    let kakao: Option<Arc<dyn KakaoApi>> = match KakaoConfig::from_env() {
        Some(kakao_config) => Some(Arc::new(KakaoClient::new(kakao_config)?)),
        None => {
            tracing::warn!("KAKAO_CLIENT_ID / KAKAO_REDIRECT_URI not set; Kakao login disabled");
            None
        }
    };

    let port = config.port;
    let state = state::AppState::new(pool, config, kakao);

    let app = match routes::leptos_app(state.clone()) {
        Ok(app) => app,
        Err(e) => {
            tracing::warn!(error = %e, "Leptos site unavailable; serving auth API only");
            routes::api_routes(state)
        }
    };

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    tracing::info!(%port, "signup server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
