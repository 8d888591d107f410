//! HTTP routes for the relay
//!
//! This module defines all HTTP endpoints exposed by the service.

pub mod agent;
pub mod health;
pub mod metrics;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let agent_routes = Router::new()
        .route("/getAzOpenAIResponse", get(agent::get_az_openai_response))
        .route(
            "/getResponse",
            get(agent::get_response).post(agent::post_response),
        );

    // Operational routes (health checks, metrics)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(metrics::prometheus_metrics));

    Router::new()
        .nest("/api/agent", agent_routes)
        .merge(public_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
