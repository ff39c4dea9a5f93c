//! HTTP server for sheetsortd

use crate::classifier::Classifier;
use crate::routes;
use crate::sheets::TabStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers
pub struct AppState {
    /// Tab store handle; `None` when the startup connection never came up.
    pub store: Option<Arc<dyn TabStore>>,
    pub classifier: Classifier,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: Option<Arc<dyn TabStore>>, classifier: Classifier) -> Self {
        Self {
            store,
            classifier,
            start_time: Instant::now(),
        }
    }
}

/// Build the router. Split out of `run` so tests can drive it in-memory.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::process_routes())
        .merge(routes::health_routes())
        .with_state(state)
        // The browser extension posts from a foreign origin.
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server
pub async fn run(state: AppState, bind_addr: &str) -> Result<()> {
    let app = app(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("  Listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
