//! UTXO Chain Core: size estimation and address codecs for Bitcoin-family chains
//!
//! This crate provides:
//! - Transaction virtual size estimation from input/output script types
//! - Address derivation from public keys (P2PKH, P2WPKH, P2SH-P2WPKH)
//! - Address verification and normalization across Base58Check, Bech32 and
//!   CashAddr
//! - Chain providers binding a chain's codec to an external data service
//!
//! # Example
//!
//! ```rust
//! use utxo_chain_core::address::AddressCodec;
//! use utxo_chain_core::core::{estimate_vsize_str, ChainParams, PLACEHOLDER_VSIZE};
//!
//! assert_eq!(estimate_vsize_str(&["P2WPKH"], &[], None, 80), PLACEHOLDER_VSIZE);
//!
//! let bch = AddressCodec::new(ChainParams::bitcoin_cash()).unwrap();
//! let result = bch.verify_address("1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggu");
//! assert!(result.is_valid);
//! assert_eq!(
//!     result.normalized_address.as_deref(),
//!     Some("bitcoincash:qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a")
//! );
//! ```

pub mod address;
pub mod cli;
pub mod config;
pub mod core;
pub mod crypto;
pub mod provider;

// Re-export commonly used types
pub use address::{Address, AddressCodec, AddressError, AddressVerification};
pub use config::{ConfigError, ProviderConfig, RegistryConfig};
pub use crate::core::{
    estimate_vsize, estimate_vsize_str, ChainParams, ChainRegistry, EncodingTag, FeeRate,
    ScriptEncoding, VsizeRequest, DEFAULT_OP_RETURN_LIMIT, PLACEHOLDER_VSIZE,
};
pub use crypto::{PubkeyProvider, PublicKey, StaticPubkey};
pub use provider::{BlockchainDataService, ChainProvider, ProviderError};
