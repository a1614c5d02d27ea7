//! Server bootstrap

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

use rinnenklar_web::{config::AppConfig, notify::Mailer, quote, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("rinnenklar_web=info,tower_http=info")
        }))
        .init();

    let config = AppConfig::from_env()?;
    let bind_addr = config.bind_addr;
    let static_dir = config.static_dir.clone();

    let mailer = Mailer::new(&config);
    let state = AppState {
        config: Arc::new(config),
        mailer,
    };

    // The calculator form is embedded cross-origin in an iframe, hence the
    // permissive CORS policy on the API routes.
    let app = Router::new()
        .merge(quote::router())
        .fallback_service(ServeDir::new(&static_dir))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!("listening on {}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
