//! Router construction and server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::{
    handler::{
        allocate_token, canvas_image, canvas_metadata, canvas_state, comment_photo,
        current_user, delete_photo, health_check, like_photo, list_photos, place,
        validate_placement, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Build the application router over `state`
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // WebSocket エンドポイント
        .route("/ws", get(websocket_handler))
        // Canvas エンドポイント
        .route("/canvas/state", get(canvas_state))
        .route("/canvas/validate-placement", post(validate_placement))
        .route("/canvas/place", post(place))
        .route("/canvas/allocate-token", post(allocate_token))
        .route("/canvas/image", get(canvas_image))
        .route("/canvas/metadata", get(canvas_metadata))
        // Gallery エンドポイント
        .route("/api/photos", get(list_photos))
        .route("/api/photos/{id}/like", post(like_photo))
        .route("/api/photos/{id}/comments", post(comment_photo))
        .route("/api/photos/{id}", delete(delete_photo))
        // その他
        .route("/api/health", get(health_check))
        .route("/auth/user", get(current_user))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Recap community server
///
/// # Example
///
/// ```ignore
/// let config = ServerConfig::default();
/// let server = Server::new(Arc::new(AppState::from_config(&config)));
/// server.run(config.host.clone(), config.port).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Run the server until Ctrl+C or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = router(self.state);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Recap server listening on {}", listener.local_addr()?);
        tracing::info!("Chat: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
