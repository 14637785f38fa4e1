//! Chain parameters and the chain registry
//!
//! Every supported chain is described by an immutable [`ChainParams`] value:
//! its version bytes, which textual address scheme it uses next to Base58Check,
//! and which script encodings can be derived for it. Codecs are built from
//! these values rather than from per-chain types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use super::encoding::ScriptEncoding;

/// Chain lookup and validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("Unknown chain: {0}")]
    UnknownChain(String),
    #[error("Invalid parameters for chain {code}: {reason}")]
    InvalidParams { code: String, reason: String },
}

/// Textual address scheme a chain uses in addition to Base58Check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AddressScheme {
    /// Bech32 segwit addresses with the given human-readable part
    Segwit { hrp: String },
    /// CashAddr addresses with the given prefix
    CashAddr { prefix: String },
    /// Base58Check only
    Legacy,
}

/// Immutable description of one chain's address parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainParams {
    /// Ticker-like chain code, e.g. `BTC`
    pub code: String,
    pub name: String,
    pub scheme: AddressScheme,
    /// Base58Check version byte for P2PKH
    pub pubkey_hash_version: u8,
    /// Base58Check version byte for P2SH
    pub script_hash_version: u8,
    /// Encodings `pubkey_to_address` can produce for this chain
    pub supported_encodings: Vec<ScriptEncoding>,
}

impl ChainParams {
    pub fn bitcoin() -> Self {
        Self {
            code: "BTC".to_string(),
            name: "Bitcoin".to_string(),
            scheme: AddressScheme::Segwit {
                hrp: "bc".to_string(),
            },
            pubkey_hash_version: 0x00,
            script_hash_version: 0x05,
            supported_encodings: ScriptEncoding::ALL.to_vec(),
        }
    }

    pub fn bitcoin_testnet() -> Self {
        Self {
            code: "TBTC".to_string(),
            name: "Bitcoin Testnet".to_string(),
            scheme: AddressScheme::Segwit {
                hrp: "tb".to_string(),
            },
            pubkey_hash_version: 0x6f,
            script_hash_version: 0xc4,
            supported_encodings: ScriptEncoding::ALL.to_vec(),
        }
    }

    pub fn litecoin() -> Self {
        Self {
            code: "LTC".to_string(),
            name: "Litecoin".to_string(),
            scheme: AddressScheme::Segwit {
                hrp: "ltc".to_string(),
            },
            pubkey_hash_version: 0x30,
            script_hash_version: 0x32,
            supported_encodings: ScriptEncoding::ALL.to_vec(),
        }
    }

    pub fn bitcoin_cash() -> Self {
        Self {
            code: "BCH".to_string(),
            name: "Bitcoin Cash".to_string(),
            scheme: AddressScheme::CashAddr {
                prefix: "bitcoincash".to_string(),
            },
            pubkey_hash_version: 0x00,
            script_hash_version: 0x05,
            supported_encodings: vec![ScriptEncoding::P2pkh],
        }
    }

    pub fn bitcoin_cash_testnet() -> Self {
        Self {
            code: "TBCH".to_string(),
            name: "Bitcoin Cash Testnet".to_string(),
            scheme: AddressScheme::CashAddr {
                prefix: "bchtest".to_string(),
            },
            pubkey_hash_version: 0x6f,
            script_hash_version: 0xc4,
            supported_encodings: vec![ScriptEncoding::P2pkh],
        }
    }

    pub fn dogecoin() -> Self {
        Self {
            code: "DOGE".to_string(),
            name: "Dogecoin".to_string(),
            scheme: AddressScheme::Legacy,
            pubkey_hash_version: 0x1e,
            script_hash_version: 0x16,
            supported_encodings: vec![ScriptEncoding::P2pkh],
        }
    }

    /// All built-in chains
    pub fn presets() -> Vec<ChainParams> {
        vec![
            Self::bitcoin(),
            Self::bitcoin_testnet(),
            Self::litecoin(),
            Self::bitcoin_cash(),
            Self::bitcoin_cash_testnet(),
            Self::dogecoin(),
        ]
    }

    pub fn supports(&self, encoding: ScriptEncoding) -> bool {
        self.supported_encodings.contains(&encoding)
    }

    /// Check the parameters describe something a codec can work with
    pub fn validate(&self) -> Result<(), ChainError> {
        let invalid = |reason: &str| ChainError::InvalidParams {
            code: self.code.clone(),
            reason: reason.to_string(),
        };

        if self.code.trim().is_empty() {
            return Err(invalid("empty chain code"));
        }
        if self.supported_encodings.is_empty() {
            return Err(invalid("no supported encodings"));
        }
        if self.pubkey_hash_version == self.script_hash_version {
            return Err(invalid("P2PKH and P2SH version bytes collide"));
        }

        match &self.scheme {
            AddressScheme::Segwit { hrp } => {
                if bech32::Hrp::parse(hrp).is_err() {
                    return Err(invalid("invalid bech32 human-readable part"));
                }
                // Addresses are always written with a lowercase hrp
                if hrp.chars().any(|c| c.is_ascii_uppercase()) {
                    return Err(invalid("bech32 human-readable part must be lowercase"));
                }
            }
            AddressScheme::CashAddr { prefix } => {
                let well_formed = !prefix.is_empty()
                    && prefix
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
                if !well_formed {
                    return Err(invalid("cashaddr prefix must be lowercase alphanumeric"));
                }
            }
            AddressScheme::Legacy => {}
        }

        let segwit_capable = matches!(self.scheme, AddressScheme::Segwit { .. });
        for encoding in &self.supported_encodings {
            match encoding {
                ScriptEncoding::P2pkh => {}
                ScriptEncoding::P2wpkh | ScriptEncoding::P2shP2wpkh if !segwit_capable => {
                    return Err(invalid(&format!(
                        "{} requires a segwit address scheme",
                        encoding
                    )));
                }
                ScriptEncoding::P2wpkh | ScriptEncoding::P2shP2wpkh => {}
            }
        }

        Ok(())
    }
}

/// Lookup table from chain code to parameters
///
/// Codes are matched case-insensitively and stored upper-cased.
#[derive(Debug, Clone)]
pub struct ChainRegistry {
    chains: BTreeMap<String, ChainParams>,
}

impl ChainRegistry {
    /// An empty registry
    pub fn empty() -> Self {
        Self {
            chains: BTreeMap::new(),
        }
    }

    /// A registry holding the built-in chains
    pub fn with_presets() -> Self {
        let mut registry = Self::empty();
        for params in ChainParams::presets() {
            registry.chains.insert(params.code.to_uppercase(), params);
        }
        registry
    }

    /// Add or replace a chain, returning the entry it replaced
    pub fn register(&mut self, mut params: ChainParams) -> Result<Option<ChainParams>, ChainError> {
        params.validate()?;
        params.code = params.code.trim().to_string();
        let key = params.code.to_uppercase();
        let previous = self.chains.insert(key, params);
        if let Some(previous) = &previous {
            log::warn!("Replacing chain parameters for {}", previous.code);
        }
        Ok(previous)
    }

    pub fn get(&self, code: &str) -> Result<&ChainParams, ChainError> {
        self.chains
            .get(&code.trim().to_uppercase())
            .ok_or_else(|| ChainError::UnknownChain(code.to_string()))
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.chains.values().map(|params| params.code.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChainParams> {
        self.chains.values()
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

impl Default for ChainRegistry {
    fn default() -> Self {
        Self::with_presets()
    }
}
