//! REST API handlers for ledger operations

use crate::core::{BalanceResolver, Block, ChainStats, LedgerEngine, LedgerError, RollbackSummary};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared application state for API handlers
///
/// The write lock is the serialized critical section for mutations; reads
/// observe a consistent snapshot under the read lock.
#[derive(Clone)]
pub struct ApiState {
    pub engine: Arc<RwLock<LedgerEngine>>,
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct SubmitResponse {
    pub tip_height: u64,
}

#[derive(Serialize)]
pub struct BalanceResponse {
    pub address: String,
    pub balance: u64,
    pub utxo_count: usize,
}

#[derive(Serialize)]
pub struct ApiError {
    pub error: String,
}

/// Map a ledger rejection to a transport response, surfacing the specific
/// reason verbatim
fn reject(err: LedgerError) -> (StatusCode, Json<ApiError>) {
    let status = match err {
        LedgerError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    };
    (
        status,
        Json(ApiError {
            error: err.to_string(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /blocks - Submit a candidate block
pub async fn submit_block(
    State(state): State<ApiState>,
    Json(block): Json<Block>,
) -> Result<Json<SubmitResponse>, (StatusCode, Json<ApiError>)> {
    let mut engine = state.engine.write().await;

    match engine.submit_block(block) {
        Ok(tip_height) => Ok(Json(SubmitResponse { tip_height })),
        Err(e) => {
            log::warn!("block rejected: {}", e);
            Err(reject(e))
        }
    }
}

/// GET /balance/{address} - Get the unspent balance of an address
pub async fn get_balance(
    State(state): State<ApiState>,
    Path(address): Path<String>,
) -> Json<BalanceResponse> {
    let engine = state.engine.read().await;
    let resolver = BalanceResolver::new(engine.utxos());

    Json(BalanceResponse {
        balance: resolver.balance_of(&address),
        utxo_count: resolver.utxo_count(&address),
        address,
    })
}

/// POST /rollback/{height} - Truncate the chain to a height
pub async fn rollback(
    State(state): State<ApiState>,
    Path(height): Path<u64>,
) -> Result<Json<RollbackSummary>, (StatusCode, Json<ApiError>)> {
    let mut engine = state.engine.write().await;

    match engine.rollback_to(height) {
        Ok(summary) => Ok(Json(summary)),
        Err(e) => {
            log::warn!("rollback to {} rejected: {}", height, e);
            Err(reject(e))
        }
    }
}

/// GET /chain - Get chain info
pub async fn get_chain_info(State(state): State<ApiState>) -> Json<ChainStats> {
    let engine = state.engine.read().await;
    Json(engine.stats())
}

/// GET /chain/blocks/{height} - Get a committed block by height
pub async fn get_block_by_height(
    State(state): State<ApiState>,
    Path(height): Path<u64>,
) -> Result<Json<Block>, (StatusCode, Json<ApiError>)> {
    let engine = state.engine.read().await;

    match engine.block_at(height) {
        Some(block) => Ok(Json(block.clone())),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiError {
                error: format!("Block at height {} not found", height),
            }),
        )),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}
