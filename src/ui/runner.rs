//! Server runner: router construction and lifecycle.
//!
//! Starts the eviction scheduler once at startup and stops it after the
//! HTTP server has drained, so request handlers and the sweep share the
//! repository for exactly the lifetime of the process.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::{
    domain::RoomRepository,
    infrastructure::repository::InMemoryRoomRepository,
    scheduler::{EvictionScheduler, SweepConfig},
    ui::{handler, signal, state::AppState},
};

/// Process-level configuration.
#[derive(Debug, Clone, Copy)]
pub struct ServerConfig {
    /// TCP port to listen on
    pub port: u16,
    /// Eviction scheduler timing
    pub sweep: SweepConfig,
}

/// Build the application router over the given repository.
pub fn build_router(repository: Arc<dyn RoomRepository>) -> Router {
    let state = Arc::new(AppState { repository });

    Router::new()
        .route("/health", get(handler::health_check))
        .route(
            "/participants",
            post(handler::join).get(handler::list_participants),
        )
        .route(
            "/messages",
            post(handler::post_message).get(handler::get_messages),
        )
        .route(
            "/messages/{id}",
            put(handler::edit_message).delete(handler::delete_message),
        )
        .route("/status", post(handler::heartbeat))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the server until a shutdown signal arrives.
pub async fn run(config: ServerConfig) -> Result<(), std::io::Error> {
    let repository: Arc<dyn RoomRepository> = Arc::new(InMemoryRoomRepository::new());

    let scheduler = EvictionScheduler::spawn(repository.clone(), config.sweep);
    let app = build_router(repository);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!("listening on port {}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(signal::shutdown_signal())
        .await?;

    scheduler.shutdown().await;
    Ok(())
}
