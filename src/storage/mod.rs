//! Storage module for durable block rows

pub mod block_store;

pub use block_store::{BlockStore, StoreConfig, StoreError};
