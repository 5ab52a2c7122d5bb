//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the database pool, the parsed configuration, and the optional
//! Kakao client (absent when Kakao OAuth is not configured).

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::services::kakao::KakaoApi;

/// Shared application state, injected into Axum handlers via State extractor.
/// Cloned per request; the pool and the `Arc`s are shared handles.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<ServerConfig>,
    /// `None` if Kakao env vars are not configured.
    pub kakao: Option<Arc<dyn KakaoApi>>,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, config: ServerConfig, kakao: Option<Arc<dyn KakaoApi>>) -> Self {
        Self { pool, config: Arc::new(config), kakao }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
