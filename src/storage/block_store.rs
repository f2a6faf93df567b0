//! Durable block rows
//!
//! The engine treats this as its durable-write/durable-read collaborator:
//! rows are appended on commit, listed in ascending height order on
//! bootstrap, and truncated on rollback. Rows live in a single JSON file
//! written atomically via a temp file and rename.

use crate::core::block::Block;
use std::fs;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use thiserror::Error;

/// Store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub blocks_file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".ledger_data"),
            blocks_file: "blocks.json".to_string(),
        }
    }
}

/// Block row store
pub struct BlockStore {
    config: StoreConfig,
}

impl BlockStore {
    /// Create a store, ensuring the data directory exists
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        fs::create_dir_all(&config.data_dir)?;
        Ok(Self { config })
    }

    /// Create with default configuration
    pub fn with_defaults() -> Result<Self, StoreError> {
        Self::new(StoreConfig::default())
    }

    fn blocks_path(&self) -> PathBuf {
        self.config.data_dir.join(&self.config.blocks_file)
    }

    /// Check if any rows have been written
    pub fn exists(&self) -> bool {
        self.blocks_path().exists()
    }

    /// Append one block row
    pub fn append_block_row(&self, block: &Block) -> Result<(), StoreError> {
        let mut rows = self.list_block_rows()?;
        rows.push(block.clone());
        self.write_rows(&rows)
    }

    /// List all block rows, ascending by height
    pub fn list_block_rows(&self) -> Result<Vec<Block>, StoreError> {
        let path = self.blocks_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = fs::File::open(&path)?;
        let reader = BufReader::new(file);
        let mut rows: Vec<Block> = serde_json::from_reader(reader)?;
        rows.sort_by_key(|block| block.height);
        Ok(rows)
    }

    /// Drop every row above the given height
    pub fn truncate_rows(&self, height: u64) -> Result<(), StoreError> {
        let mut rows = self.list_block_rows()?;
        rows.retain(|block| block.height <= height);
        self.write_rows(&rows)
    }

    fn write_rows(&self, rows: &[Block]) -> Result<(), StoreError> {
        // Write to a temporary file first, then rename into place
        let temp_path = self.config.data_dir.join("blocks.tmp");
        let file = fs::File::create(&temp_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, rows)?;
        fs::rename(&temp_path, self.blocks_path())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::block::{Output, Transaction};

    fn store_in(dir: &std::path::Path) -> BlockStore {
        BlockStore::new(StoreConfig {
            data_dir: dir.to_path_buf(),
            ..Default::default()
        })
        .unwrap()
    }

    fn block(height: u64) -> Block {
        Block::new(
            height,
            vec![Transaction::new(
                format!("tx{}", height),
                vec![],
                vec![Output {
                    address: "addr1".to_string(),
                    value: 10,
                }],
            )],
        )
    }

    #[test]
    fn test_empty_store_lists_no_rows() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = store_in(temp_dir.path());

        assert!(!store.exists());
        assert!(store.list_block_rows().unwrap().is_empty());
    }

    #[test]
    fn test_append_and_list() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = store_in(temp_dir.path());

        store.append_block_row(&block(1)).unwrap();
        store.append_block_row(&block(2)).unwrap();
        store.append_block_row(&block(3)).unwrap();

        let rows = store.list_block_rows().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows.iter().map(|b| b.height).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(rows[0], block(1));
    }

    #[test]
    fn test_truncate_rows() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = store_in(temp_dir.path());

        for height in 1..=5 {
            store.append_block_row(&block(height)).unwrap();
        }

        store.truncate_rows(2).unwrap();
        let rows = store.list_block_rows().unwrap();
        assert_eq!(
            rows.iter().map(|b| b.height).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_rows_survive_reopen() {
        let temp_dir = tempfile::tempdir().unwrap();

        {
            let store = store_in(temp_dir.path());
            store.append_block_row(&block(1)).unwrap();
        }

        let store = store_in(temp_dir.path());
        assert!(store.exists());
        assert_eq!(store.list_block_rows().unwrap().len(), 1);
    }
}
