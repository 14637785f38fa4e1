//! Base58Check encoding
//!
//! `base58(version || payload || checksum)` where the checksum is the first
//! four bytes of the double SHA-256 of `version || payload`.

use crate::crypto::{checksum, CHECKSUM_LEN, HASH160_LEN};

use super::FormatError;

/// Encode a version byte and payload as Base58Check
pub fn encode(version: u8, payload: &[u8]) -> String {
    let mut bytes = Vec::with_capacity(1 + payload.len() + CHECKSUM_LEN);
    bytes.push(version);
    bytes.extend_from_slice(payload);
    let check = checksum(&bytes);
    bytes.extend_from_slice(&check);
    bs58::encode(bytes).into_string()
}

/// A decoded Base58Check address carrying a 20-byte hash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Base58Payload {
    pub version: u8,
    pub hash: [u8; HASH160_LEN],
}

/// Decode a Base58Check address whose payload is a 20-byte hash
pub fn decode(address: &str) -> Result<Base58Payload, FormatError> {
    let bytes = bs58::decode(address)
        .into_vec()
        .map_err(|e| FormatError::Base58(e.to_string()))?;

    if bytes.len() != 1 + HASH160_LEN + CHECKSUM_LEN {
        return Err(FormatError::Length(bytes.len()));
    }

    let (body, check) = bytes.split_at(1 + HASH160_LEN);
    if checksum(body) != check {
        return Err(FormatError::Checksum);
    }

    let mut hash = [0u8; HASH160_LEN];
    hash.copy_from_slice(&body[1..]);
    Ok(Base58Payload {
        version: body[0],
        hash,
    })
}
