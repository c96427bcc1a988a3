mod config;
mod error;
mod handlers;
mod routes;

use anyhow::Result;
use axum::{routing::get, Router};
use shared::api::ShellConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::routes::api_routes;

#[derive(Clone)]
pub struct AppState {
    pub shell: Arc<ShellConfig>,
    pub dist_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenv::dotenv().ok();
    let config = AppConfig::from_env()?;

    tracing::info!("Starting portal shell server");
    tracing::info!(
        "Root route: {:?}, serving app from {}",
        config.root_route,
        config.dist_dir.display()
    );

    let state = AppState {
        shell: Arc::new(config.shell_config()),
        dist_dir: config.dist_dir.clone(),
    };
    let app = create_app(state);

    // Run server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Client-side routes all load index.html; the app decides what to show
    let spa = ServeDir::new(&state.dist_dir)
        .fallback(ServeFile::new(state.dist_dir.join("index.html")));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/api", api_routes())
        .fallback_service(spa)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
