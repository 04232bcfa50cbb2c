//! axum web server for the metrics dashboard.
//!
//! `GET /metrics` returns the current [`MetricsSnapshot`] as JSON;
//! `GET /health` answers with a short liveness document.

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::routing::get;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use super::{DashboardState, MetricsSnapshot};

pub fn router(state: Arc<DashboardState>) -> Router {
    Router::new()
        .route("/metrics", get(metrics))
        .route("/health", get(health))
        .with_state(state)
}

/// Start the dashboard web server. Runs forever on its own tasks.
pub async fn start(state: Arc<DashboardState>, port: u16) {
    let app = router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Dashboard failed to bind to {}: {}", addr, e);
            return;
        }
    };
    tracing::info!("Dashboard listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Dashboard server error: {}", e);
    }
}

async fn metrics(State(state): State<Arc<DashboardState>>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}

async fn health(State(state): State<Arc<DashboardState>>) -> Json<Value> {
    let snap = state.metrics.snapshot();
    Json(json!({
        "status": "ok",
        "uptime_secs": snap.uptime_secs,
        "sessions": snap.sessions,
        "maps": state.maps.len(),
    }))
}
