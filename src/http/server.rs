use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes::{
    explain_handler, feedback_handler, health_handler, not_found_handler, AppState,
};
use crate::domain::ports::ChatCompleter;
use crate::utils::error::{GatewayError, Result};

/// Build the full application router. CORS is permissive: the caller is a
/// browser extension running on arbitrary origins.
pub fn build_router<C: ChatCompleter + 'static>(state: Arc<AppState<C>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler::<C>))
        .route("/api/explain", post(explain_handler::<C>))
        .route("/api/feedback", post(feedback_handler))
        .fallback(not_found_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(port: u16, router: Router) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await.map_err(GatewayError::IoError)?;

    tracing::info!("🚀 Ask AYO API running on port {}", port);
    tracing::info!("🔗 Health check: http://localhost:{}/health", port);

    axum::serve(listener, router)
        .await
        .map_err(GatewayError::IoError)?;

    Ok(())
}
