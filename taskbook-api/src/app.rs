//! Application state and router builder
//!
//! Defines the shared application state and builds the Axum router with all
//! routes and middleware.
//!
//! # Architecture
//!
//! ```text
//! /
//! ├── /health                       # Health check (public)
//! └── /api/
//!     ├── /auth/
//!     │   ├── POST /register        # Create account (public)
//!     │   ├── POST /login           # Obtain token (public)
//!     │   └── POST /refresh         # Re-issue token (bearer)
//!     ├── /tasks/                   # Task CRUD & toggle (all bearer)
//!     │   ├── GET    /
//!     │   ├── POST   /
//!     │   ├── GET    /:id
//!     │   ├── PUT    /:id
//!     │   ├── DELETE /:id
//!     │   └── PATCH  /:id/toggle-read
//!     └── /users/
//!         ├── GET /me               # Current user (bearer)
//!         └── GET /                 # Safe user list (public)
//! ```
//!
//! Middleware stack, outermost first: CORS (open to all origins), request
//! tracing, then the per-group bearer-auth layer. Unmatched paths fall
//! through to a JSON 404.

use crate::config::Config;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use taskbook_shared::auth::{
    jwt,
    middleware::{AuthContext, AuthError},
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. Uses Arc
/// internally for cheap cloning; the pool is already reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Example
///
/// ```no_run
/// use taskbook_api::app::{build_router, AppState};
/// use taskbook_api::config::Config;
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
///
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:4000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes: register/login public, refresh requires a valid token
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .merge(
            Router::new()
                .route("/refresh", post(routes::auth::refresh))
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    bearer_auth_layer,
                )),
        );

    // Task routes (all require bearer authentication)
    let task_routes = Router::new()
        .route(
            "/",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/:id",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .route("/:id/toggle-read", patch(routes::tasks::toggle_task_read))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_layer,
        ));

    // User routes: /me requires auth, the listing is public
    let user_routes = Router::new()
        .route("/", get(routes::users::list_users))
        .merge(
            Router::new()
                .route("/me", get(routes::users::get_me))
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    bearer_auth_layer,
                )),
        );

    // Feature routes mounted under /api
    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/tasks", task_routes)
        .nest("/users", user_routes);

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bearer token authentication middleware layer
///
/// Extracts and validates the token from the Authorization header, then
/// injects [`AuthContext`] into request extensions. Stateless: no lookup,
/// no retry, just signature and expiry verification.
async fn bearer_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    // Expect "Authorization: Bearer <token>"
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MissingCredentials)?;

    let claims = jwt::validate_token(token, state.jwt_secret())
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

    req.extensions_mut().insert(AuthContext::from_claims(&claims));

    Ok(next.run(req).await)
}

/// Catch-all handler for unmatched routes
async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" })))
}
