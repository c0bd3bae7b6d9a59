//! Shared helpers for API integration tests.

use std::sync::Arc;

use axum::Router;
use loretable_api::auth::jwt::{generate_access_token, JwtConfig};
use loretable_api::config::ServerConfig;
use loretable_api::router::build_app_router;
use loretable_api::state::AppState;
use loretable_core::types::DbId;
use loretable_db::repositories::UserRepo;
use sqlx::PgPool;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-0123456789abcdef".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Mirrors the production router construction so
/// integration tests exercise the same middleware stack.
#[allow(dead_code)]
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Insert a user directly and return its id.
pub async fn seed_user(pool: &PgPool, username: &str) -> DbId {
    UserRepo::create(pool, username, "argon2id-placeholder-hash")
        .await
        .expect("user insert should succeed")
        .id
}

/// Bearer token for a seeded user, signed with the test secret.
#[allow(dead_code)]
pub fn token_for(user_id: DbId) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("token generation should succeed")
}
