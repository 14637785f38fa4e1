//! CLI commands
//!
//! Command handlers return printable values so the binary stays a thin
//! argument parser.

use serde::Serialize;
use std::path::Path;

use crate::address::{AddressCodec, AddressVerification};
use crate::config::RegistryConfig;
use crate::core::{AddressScheme, ChainRegistry, EncodingTag, ScriptEncoding, VsizeRequest};
use crate::crypto::StaticPubkey;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Application state
pub struct AppState {
    pub registry: ChainRegistry,
}

impl AppState {
    /// Built-in chains plus those from an optional config file
    pub fn new(config_path: Option<&Path>) -> CliResult<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading chain config from {}", path.display());
                RegistryConfig::load(path)?
            }
            None => RegistryConfig::default(),
        };
        Ok(Self {
            registry: config.into_registry()?,
        })
    }

    fn codec(&self, chain: &str) -> CliResult<AddressCodec> {
        let params = self.registry.get(chain)?.clone();
        Ok(AddressCodec::new(params)?)
    }
}

/// One row of the `chains` listing
#[derive(Debug, Clone, Serialize)]
pub struct ChainSummary {
    pub code: String,
    pub name: String,
    pub scheme: String,
    pub encodings: Vec<ScriptEncoding>,
}

/// Estimate a transaction's vsize
pub fn estimate(
    inputs: &[String],
    outputs: &[String],
    op_return: Option<&str>,
    op_return_limit: usize,
) -> u64 {
    let mut request = VsizeRequest::new().op_return_limit(op_return_limit);
    request.inputs = inputs.iter().map(|tag| EncodingTag::from(tag.as_str())).collect();
    request.outputs = outputs.iter().map(|tag| EncodingTag::from(tag.as_str())).collect();
    if let Some(text) = op_return {
        request = request.op_return_text(text);
    }

    for tag in request.inputs.iter().chain(&request.outputs) {
        if let EncodingTag::Unknown(unknown) = tag {
            log::warn!("Unknown encoding {:?} counted as zero bytes", unknown);
        }
    }

    request.estimate()
}

/// Verify an address on a chain
pub fn verify(state: &AppState, chain: &str, address: &str) -> CliResult<AddressVerification> {
    Ok(state.codec(chain)?.verify_address(address))
}

/// Derive an address from a hex public key
pub async fn derive(
    state: &AppState,
    chain: &str,
    pubkey_hex: &str,
    encoding: &str,
) -> CliResult<String> {
    let codec = state.codec(chain)?;
    let encoding: ScriptEncoding = encoding.parse()?;
    let provider = StaticPubkey::from_hex(pubkey_hex)?;
    let address = codec.pubkey_to_address(&provider, encoding).await?;
    Ok(address.into_string())
}

/// Every registered chain
pub fn list_chains(state: &AppState) -> Vec<ChainSummary> {
    state
        .registry
        .iter()
        .map(|params| ChainSummary {
            code: params.code.clone(),
            name: params.name.clone(),
            scheme: match &params.scheme {
                AddressScheme::Segwit { hrp } => format!("segwit ({hrp})"),
                AddressScheme::CashAddr { prefix } => format!("cashaddr ({prefix})"),
                AddressScheme::Legacy => "base58check".to_string(),
            },
            encodings: params.supported_encodings.clone(),
        })
        .collect()
}
