//! UTXO Chain CLI Application
//!
//! A command-line interface for vsize estimation and address handling.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use utxo_chain_core::cli::{self, AppState};
use utxo_chain_core::core::DEFAULT_OP_RETURN_LIMIT;

#[derive(Parser)]
#[command(name = "utxo-chain")]
#[command(author = "Darshan")]
#[command(version = "0.1.0")]
#[command(about = "Vsize estimation and address codecs for Bitcoin-family chains", long_about = None)]
struct Cli {
    /// JSON file with additional chain definitions
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the virtual size of a transaction
    Vsize {
        /// Input encoding (repeatable), e.g. P2WPKH
        #[arg(short, long = "input")]
        inputs: Vec<String>,

        /// Output encoding (repeatable), e.g. P2PKH
        #[arg(short, long = "output")]
        outputs: Vec<String>,

        /// Text payload carried in OP_RETURN outputs
        #[arg(long)]
        op_return: Option<String>,

        /// Maximum payload bytes per OP_RETURN output
        #[arg(long, default_value_t = DEFAULT_OP_RETURN_LIMIT)]
        op_return_limit: usize,
    },

    /// Verify and normalize an address
    Verify {
        /// Chain code, e.g. BTC or BCH
        #[arg(long, default_value = "BTC")]
        chain: String,

        /// Address to check
        address: String,
    },

    /// Derive an address from a public key
    Derive {
        /// Chain code, e.g. BTC or BCH
        #[arg(long, default_value = "BTC")]
        chain: String,

        /// Hex-encoded SEC1 public key
        #[arg(short, long)]
        pubkey: String,

        /// Script encoding: P2PKH, P2WPKH or P2SH-P2WPKH
        #[arg(short, long, default_value = "P2PKH")]
        encoding: String,
    },

    /// List known chains
    Chains,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let state = AppState::new(cli.config.as_deref())?;

    match cli.command {
        Commands::Vsize {
            inputs,
            outputs,
            op_return,
            op_return_limit,
        } => {
            let vsize = cli::estimate(&inputs, &outputs, op_return.as_deref(), op_return_limit);
            println!("{}", vsize);
        }
        Commands::Verify { chain, address } => {
            let result = cli::verify(&state, &chain, &address)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Derive {
            chain,
            pubkey,
            encoding,
        } => {
            let address = cli::derive(&state, &chain, &pubkey, &encoding).await?;
            println!("{}", address);
        }
        Commands::Chains => {
            println!("{}", serde_json::to_string_pretty(&cli::list_chains(&state))?);
        }
    }

    Ok(())
}
