//! Configuration
//!
//! Extra chains can be registered from a JSON file next to the built-in
//! presets:
//!
//! ```json
//! {
//!   "chains": [
//!     {
//!       "code": "XEC",
//!       "name": "eCash",
//!       "scheme": { "type": "cashaddr", "prefix": "ecash" },
//!       "pubkey_hash_version": 0,
//!       "script_hash_version": 5,
//!       "supported_encodings": ["P2PKH"]
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::core::{ChainError, ChainParams, ChainRegistry, DEFAULT_OP_RETURN_LIMIT};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Chain error: {0}")]
    ChainError(#[from] ChainError),
}

/// Chains to register on top of the presets
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub chains: Vec<ChainParams>,
}

impl RegistryConfig {
    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Presets plus every configured chain
    pub fn into_registry(self) -> Result<ChainRegistry, ConfigError> {
        let mut registry = ChainRegistry::with_presets();
        for params in self.chains {
            log::info!("Registering chain {} ({})", params.code, params.name);
            registry.register(params)?;
        }
        Ok(registry)
    }
}

/// Provider behaviour defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Maximum payload bytes per OP_RETURN output
    pub op_return_limit: usize,
    /// Confirmation target used when asking the data service for a fee rate
    pub fee_target_blocks: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            op_return_limit: DEFAULT_OP_RETURN_LIMIT,
            fee_target_blocks: 3,
        }
    }
}
