//! Cryptographic utilities for address derivation
//!
//! This module provides:
//! - SHA-256 / HASH160 digests and Base58Check checksums
//! - secp256k1 public key validation
//! - The public key capability consumed by the codecs

pub mod hash;
pub mod keys;

pub use hash::{checksum, double_sha256, hash160, sha256, CHECKSUM_LEN, HASH160_LEN};
pub use keys::{
    KeyError, PubkeyProvider, PublicKey, StaticPubkey, VerifierError, COMPRESSED_PUBKEY_LEN,
    UNCOMPRESSED_PUBKEY_LEN,
};
