//! REST API routes configuration

use crate::api::handlers::{self, ApiState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

/// Create the API router with all routes
pub fn create_router(state: ApiState) -> Router {
    // Configure CORS for browser access
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Ledger operations
        .route("/blocks", post(handlers::submit_block))
        .route("/balance/{address}", get(handlers::get_balance))
        .route("/rollback/{height}", post(handlers::rollback))
        // Chain inspection
        .route("/chain", get(handlers::get_chain_info))
        .route("/chain/blocks/{height}", get(handlers::get_block_by_height))
        // Add state and middleware
        .with_state(state)
        .layer(cors)
}
