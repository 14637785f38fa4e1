//! Core chain-family components
//!
//! This module contains:
//! - Script encodings (P2PKH, P2WPKH, P2SH-P2WPKH)
//! - Transaction virtual size estimation
//! - Chain parameters and the chain registry
//! - Fee rates

pub mod chain;
pub mod encoding;
pub mod fee;
pub mod vsize;

pub use chain::{AddressScheme, ChainError, ChainParams, ChainRegistry};
pub use encoding::{EncodingTag, ScriptEncoding, UnknownEncoding};
pub use fee::FeeRate;
pub use vsize::{
    estimate_vsize, estimate_vsize_str, input_weight, op_return_chunk_count, output_weight,
    split_op_return, VsizeRequest, DEFAULT_OP_RETURN_LIMIT, PLACEHOLDER_VSIZE,
};
