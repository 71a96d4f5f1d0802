use axum::{http::Method, response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

mod config;
mod database;
mod dtos;
mod errors;
mod handlers;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;

use config::{AppConfig, StoreBackend};
use database::memory::MemoryStore;
use repositories::Store;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    let store = open_store(&config).await?;
    let app_state = AppState::new(store, &config);

    app_state
        .auth
        .ensure_default_admin(&config.admin_email, &config.admin_password)
        .await?;

    let app = build_router(app_state);
    start_server(app, &config).await
}

async fn open_store(config: &AppConfig) -> anyhow::Result<Store> {
    let store = match config.store_backend {
        StoreBackend::MongoDb => {
            tracing::info!("Using MongoDB store (database '{}')", config.database_name);
            database::mongo::connect(config).await?
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, data is lost on restart");
            MemoryStore::new().into_store()
        }
    };
    Ok(store)
}

fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .allow_credentials(false);

    let api = Router::new()
        .route("/health", get(health_check))
        .nest("/auth", routes::auth::routes(&app_state))
        .nest("/teams", routes::teams::routes(&app_state))
        .nest("/players", routes::players::routes(&app_state))
        .nest("/matches", routes::matches::routes(&app_state))
        .nest("/reports", routes::reports::routes());

    Router::new()
        .route("/", get(root_handler))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

async fn start_server(app: Router, config: &AppConfig) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

async fn root_handler() -> &'static str {
    "Football Competition API"
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
