//! UTXO Ledger CLI Application
//!
//! A command-line interface for running and inspecting the ledger service.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use utxo_ledger::api::{create_router, ApiState};
use utxo_ledger::core::LedgerEngine;
use utxo_ledger::storage::{BlockStore, StoreConfig};

#[derive(Parser)]
#[command(name = "ledger")]
#[command(version = "0.1.0")]
#[command(about = "A UTXO ledger with block validation, balance queries and bounded rollback", long_about = None)]
struct Cli {
    /// Data directory for ledger storage
    #[arg(short, long, default_value = ".ledger_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the REST API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Display ledger information
    Info,

    /// Show the unspent balance of an address
    Balance {
        /// Address to query
        address: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => run_serve(&cli.data_dir, port),

        Commands::Info => {
            let engine = open_engine(&cli.data_dir)?;
            let stats = engine.stats();
            println!("Tip height:   {}", stats.tip_height);
            println!("Blocks:       {}", stats.total_blocks);
            println!("Transactions: {}", stats.total_transactions);
            println!("Live outputs: {}", stats.utxo_count);
            Ok(())
        }

        Commands::Balance { address } => {
            let engine = open_engine(&cli.data_dir)?;
            println!("{}", engine.get_balance(&address));
            Ok(())
        }
    }
}

fn open_engine(data_dir: &Path) -> Result<LedgerEngine, Box<dyn std::error::Error>> {
    let store = Arc::new(BlockStore::new(StoreConfig {
        data_dir: data_dir.to_path_buf(),
        ..Default::default()
    })?);
    Ok(LedgerEngine::open(store)?)
}

fn run_serve(data_dir: &Path, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;

    rt.block_on(async {
        if BlockStore::new(StoreConfig {
            data_dir: data_dir.to_path_buf(),
            ..Default::default()
        })?
        .exists()
        {
            println!("📂 Loading existing ledger...");
        } else {
            println!("📂 Creating new ledger...");
        }

        let engine = open_engine(data_dir)?;
        let state = ApiState {
            engine: Arc::new(RwLock::new(engine)),
        };
        let app = create_router(state);

        let addr = format!("0.0.0.0:{}", port);
        println!("🚀 REST API server starting on http://localhost:{}", port);
        println!();
        println!("📖 Available endpoints:");
        println!("   GET  /health                  - Health check");
        println!("   POST /blocks                  - Submit a block");
        println!("   GET  /balance/{{address}}       - Get balance");
        println!("   POST /rollback/{{height}}       - Roll back to height");
        println!("   GET  /chain                   - Ledger info");
        println!("   GET  /chain/blocks/{{height}}   - Get block");
        println!();

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
