//! Public key handling for address derivation
//!
//! The codecs never hold secret material. Public keys arrive through a
//! [`PubkeyProvider`] capability (a hardware signer, a remote key service,
//! or a fixed key for watch-only use) and are validated as secp256k1 points
//! before they are hashed.

use async_trait::async_trait;
use secp256k1::PublicKey as Secp256k1PublicKey;
use thiserror::Error;

use super::hash::{hash160, HASH160_LEN};

/// Length of a compressed SEC1 public key
pub const COMPRESSED_PUBKEY_LEN: usize = 33;

/// Length of an uncompressed SEC1 public key
pub const UNCOMPRESSED_PUBKEY_LEN: usize = 65;

/// Error type surfaced by public key providers, passed through untouched
pub type VerifierError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while interpreting public key bytes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("Invalid public key length: {0} bytes")]
    InvalidLength(usize),
    #[error("Invalid public key: not a point on secp256k1")]
    InvalidPublicKey,
    #[error("Invalid public key hex")]
    InvalidHex,
}

/// Capability that supplies the raw public key for derivation
///
/// Implementations own any retry or cancellation policy; the codec awaits
/// the call once and propagates its error as-is.
#[async_trait]
pub trait PubkeyProvider: Send + Sync {
    /// Fetch the SEC1-encoded public key bytes
    async fn get_pubkey(&self) -> Result<Vec<u8>, VerifierError>;
}

/// A validated secp256k1 public key, remembering the form it was supplied in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    inner: Secp256k1PublicKey,
    compressed: bool,
}

impl PublicKey {
    /// Parse SEC1 bytes (33-byte compressed or 65-byte uncompressed)
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        let compressed = match bytes.len() {
            COMPRESSED_PUBKEY_LEN => true,
            UNCOMPRESSED_PUBKEY_LEN => false,
            len => return Err(KeyError::InvalidLength(len)),
        };
        let inner =
            Secp256k1PublicKey::from_slice(bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self { inner, compressed })
    }

    /// Parse a hex-encoded SEC1 public key
    pub fn from_hex(hex_key: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_key.trim()).map_err(|_| KeyError::InvalidHex)?;
        Self::from_slice(&bytes)
    }

    /// Whether the key was supplied in compressed form
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// The key serialized in the form it was supplied in
    pub fn serialize(&self) -> Vec<u8> {
        if self.compressed {
            self.inner.serialize().to_vec()
        } else {
            self.inner.serialize_uncompressed().to_vec()
        }
    }

    /// The compressed serialization, required by segwit outputs
    pub fn serialize_compressed(&self) -> [u8; COMPRESSED_PUBKEY_LEN] {
        self.inner.serialize()
    }

    /// HASH160 of the key as supplied (legacy P2PKH commitment)
    pub fn hash160(&self) -> [u8; HASH160_LEN] {
        hash160(&self.serialize())
    }

    /// HASH160 of the compressed key (segwit commitment)
    pub fn compressed_hash160(&self) -> [u8; HASH160_LEN] {
        hash160(&self.serialize_compressed())
    }

    /// Hex of the key as supplied
    pub fn to_hex(&self) -> String {
        hex::encode(self.serialize())
    }
}

/// A provider that always returns the same public key
///
/// Used for watch-only flows where the key is already known.
#[derive(Debug, Clone)]
pub struct StaticPubkey {
    bytes: Vec<u8>,
}

impl StaticPubkey {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Build from a hex string, validating the key up front
    pub fn from_hex(hex_key: &str) -> Result<Self, KeyError> {
        let key = PublicKey::from_hex(hex_key)?;
        Ok(Self::new(key.serialize()))
    }
}

#[async_trait]
impl PubkeyProvider for StaticPubkey {
    async fn get_pubkey(&self) -> Result<Vec<u8>, VerifierError> {
        Ok(self.bytes.clone())
    }
}
