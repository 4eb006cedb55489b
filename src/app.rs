//! Shared application state and HTTP router.

use std::sync::Arc;

use axum::{
    Router,
    extract::FromRef,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    auth::jwt::JwtService, config::Config, db::DbPool, handlers, middleware,
    services::auth_service::TokenConfig,
};

/// State shared by every handler.
///
/// Cloned per request; the pool and token settings are reference counted.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub tokens: Arc<TokenConfig>,
}

impl AppState {
    pub fn new(pool: DbPool, tokens: TokenConfig) -> Self {
        Self {
            pool,
            tokens: Arc::new(tokens),
        }
    }

    /// Build state from loaded configuration and an open pool.
    pub fn from_config(pool: DbPool, config: &Config) -> Self {
        let jwt = JwtService::new(
            &config.jwt_secret,
            config.access_token_ttl_minutes,
            config.jwt_issuer.clone(),
        );

        Self::new(pool, TokenConfig::new(jwt, config.refresh_token_ttl_days))
    }
}

/// Lets handlers that only need the database extract `State<DbPool>`.
impl FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

/// Build the full router: public auth and health routes plus the
/// bearer-protected expense and category routes.
pub fn create_router(state: AppState) -> Router {
    // Authenticated routes (require a valid access token)
    let authenticated_routes = Router::new()
        .route(
            "/api/v1/categories",
            get(handlers::categories::list_categories),
        )
        .route(
            "/api/v1/expenses",
            post(handlers::expenses::create_expense).get(handlers::expenses::list_expenses),
        )
        .route(
            "/api/v1/expenses/past-week",
            get(handlers::expenses::list_past_week),
        )
        .route(
            "/api/v1/expenses/past-month",
            get(handlers::expenses::list_past_month),
        )
        .route(
            "/api/v1/expenses/last-3-months",
            get(handlers::expenses::list_last_three_months),
        )
        .route(
            "/api/v1/expenses/custom",
            get(handlers::expenses::list_custom_range),
        )
        .route(
            "/api/v1/expenses/{id}",
            get(handlers::expenses::get_expense)
                .put(handlers::expenses::update_expense)
                .delete(handlers::expenses::delete_expense),
        )
        // Apply authentication middleware to all routes in this group
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    Router::new()
        // Public routes (no authentication required)
        .route("/health", get(handlers::health::health_check))
        .route("/api/v1/auth/register", post(handlers::auth::register))
        .route("/api/v1/auth/login", post(handlers::auth::login))
        .route("/api/v1/auth/refresh", post(handlers::auth::refresh))
        .route("/api/v1/auth/logout", post(handlers::auth::logout))
        .merge(authenticated_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
