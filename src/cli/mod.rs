//! Command-line interface support

pub mod commands;

pub use commands::{derive, estimate, list_chains, verify, AppState, ChainSummary, CliResult};
