//! # tradepost_api
//!
//! HTTP API library for Tradepost.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use axum::Router;
use axum::routing::{get, post, put};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};

use tradepost_core::models::auth::{RequiredRoles, Role};

use crate::config::ApiConfig;
use crate::handlers::{auth, health, items, users};

/// Roles accepted by the user-administration routes.
const ADMIN_ONLY: RequiredRoles = RequiredRoles::new(&[Role::Admin]);

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: PgPool,
    /// API configuration.
    pub config: ApiConfig,
}

/// Run embedded database migrations.
///
/// Delegates to `tradepost_core::migrate::migrate()` which owns the migration
/// files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    tradepost_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route("/", get(health::health_handler))
        .route("/api/auth/register", post(auth::register_handler))
        .route("/api/auth/login", post(auth::login_handler))
        .route("/api/items", get(items::list_items_handler))
        .route("/api/items/{id}", get(items::get_item_handler));

    // Routes requiring an authenticated principal
    let protected = Router::new()
        .route("/api/auth/me", get(auth::me_handler))
        .route("/api/auth/logout", post(auth::logout_handler))
        .route("/api/items", post(items::create_item_handler))
        .route(
            "/api/items/{id}",
            put(items::update_item_handler).delete(items::delete_item_handler),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    // User administration requires authentication plus the admin role.
    // Layers run outermost-last-added: the role stage is added first so the
    // authentication stage wraps it and runs before it.
    let admin = Router::new()
        .route("/api/users", get(users::list_users_handler))
        .route(
            "/api/users/{id}",
            get(users::get_user_handler)
                .put(users::update_user_handler)
                .delete(users::delete_user_handler),
        )
        .route_layer(axum::middleware::from_fn(
            |request: axum::extract::Request, next: axum::middleware::Next| {
                middleware::auth::require_role(ADMIN_ONLY, request, next)
            },
        ))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .merge(admin)
        .layer(cors)
        .with_state(state)
}
