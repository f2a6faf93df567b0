//! REST API module
//!
//! Provides HTTP access to the ledger engine.
//!
//! # Endpoints
//!
//! - `POST /blocks` - Submit a candidate block
//! - `GET /balance/:address` - Unspent balance of an address
//! - `POST /rollback/:height` - Truncate the chain to a height
//! - `GET /chain` - Chain info
//! - `GET /chain/blocks/:height` - Get block by height
//! - `GET /health` - Health check

pub mod handlers;
pub mod routes;

pub use handlers::ApiState;
pub use routes::create_router;
