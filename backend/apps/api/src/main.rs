//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use std::sync::Arc;

use auth::{Authenticator, PgAuthRepository, auth_router};
use axum::{
    Extension, Json, Router,
    http::{Method, header},
    routing::get,
};
use blog::{PgBlogRepository, blog_router};
use serde_json::{Value, json};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog_api=info,auth=info,blog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let auth_repo = PgAuthRepository::new(pool.clone());
    let authenticator = Authenticator::new(
        Arc::new(auth_repo.clone()),
        Arc::new(config.auth.token_signer()),
    );

    let cors = CorsLayer::new()
        .allow_origin(config.frontend_origins.clone())
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    let app = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_router(auth_repo, config.auth.clone()))
        .merge(blog_router(PgBlogRepository::new(pool), authenticator))
        .layer(Extension(config.trusted_proxies.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    if config.trusted_proxies.is_empty() {
        tracing::info!("No trusted proxies, X-Forwarded-For is ignored");
    }
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to Blog API" }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
