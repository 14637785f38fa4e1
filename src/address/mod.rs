//! Address encoding, decoding and validation for Bitcoin-family chains
//!
//! This module provides:
//! - Base58Check (legacy P2PKH / P2SH)
//! - Bech32 segwit v0 (P2WPKH)
//! - CashAddr (Bitcoin Cash style P2PKH)
//! - [`AddressCodec`], which picks between them from a chain's parameters

pub mod base58check;
pub mod cashaddr;
pub mod codec;
pub mod segwit;

use thiserror::Error;

pub use cashaddr::{CashAddrKind, CashAddrPayload};
pub use codec::{Address, AddressCodec, AddressError, AddressVerification};

/// Why a string failed to parse under one particular address format
///
/// These never escape address verification; they are logged and the next
/// format is tried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Base58 error: {0}")]
    Base58(String),
    #[error("Bech32 error: {0}")]
    Bech32(String),
    #[error("Invalid checksum")]
    Checksum,
    #[error("Invalid payload length: {0}")]
    Length(usize),
    #[error("Unexpected prefix: {0}")]
    Prefix(String),
    #[error("Unexpected version byte: {0:#04x}")]
    Version(u8),
    #[error("Unsupported witness version: {0}")]
    WitnessVersion(u8),
    #[error("Invalid character: {0:?}")]
    Character(char),
    #[error("Mixed-case address")]
    MixedCase,
    #[error("Non-zero padding")]
    Padding,
}
