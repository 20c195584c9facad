//! Contract API Server - Backend for two-party contract projects
//!
//! Provides REST endpoints for:
//! - Project storage (template, clauses and questions for each party)
//! - Questionnaires and contract generation
//! - Generated contract history
//! - Template analysis for authoring tools

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

mod config;
mod error;
mod handlers;
mod models;
mod state;

use config::ApiConfig;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("contract_api=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    let config = ApiConfig::from_env();

    info!("Initializing Contract API...");
    let state = Arc::new(AppState::new(&config.database_url).await?);

    let app = build_router(state);

    let addr = config.socket_addr()?;
    info!("Starting Contract API on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn build_router(state: Arc<AppState>) -> Router {
    // CORS configuration for web clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        // Projects
        .route(
            "/api/projects",
            get(handlers::list_projects).post(handlers::create_project),
        )
        .route(
            "/api/projects/:id",
            get(handlers::get_project)
                .put(handlers::update_project)
                .delete(handlers::delete_project),
        )
        .route(
            "/api/projects/:id/questionnaire/:role",
            get(handlers::get_questionnaire),
        )
        .route("/api/projects/:id/generate", post(handlers::generate))
        // Generated contracts
        .route(
            "/api/contracts",
            get(handlers::list_contracts).post(handlers::create_contract),
        )
        // Authoring
        .route("/api/templates/analyze", post(handlers::analyze_template))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
