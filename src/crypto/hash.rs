//! Hashing primitives used by the address codecs
//!
//! Provides the SHA-256 and RIPEMD-160 compositions that Bitcoin-family
//! address formats are built from.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Length of a HASH160 digest in bytes
pub const HASH160_LEN: usize = 20;

/// Length of a Base58Check checksum in bytes
pub const CHECKSUM_LEN: usize = 4;

/// Computes SHA-256 hash of the input data
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Computes double SHA-256 hash (SHA-256 of SHA-256)
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// HASH160 = RIPEMD160(SHA256(data))
///
/// This is the digest committed to by P2PKH, P2WPKH and P2SH outputs.
pub fn hash160(data: &[u8]) -> [u8; HASH160_LEN] {
    let mut ripemd = Ripemd160::new();
    ripemd.update(sha256(data));
    ripemd.finalize().into()
}

/// First four bytes of the double SHA-256 of `data`
pub fn checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = double_sha256(data);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256() {
        assert_eq!(
            hex::encode(sha256(b"hello world")),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_hash160_of_generator_point() {
        // Compressed secp256k1 generator, i.e. the public key of secret key 1
        let pubkey =
            hex::decode("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798")
                .unwrap();
        assert_eq!(
            hex::encode(hash160(&pubkey)),
            "751e76e8199196d454941c45d1b3a323f1433bd6"
        );
    }

    #[test]
    fn test_checksum_is_prefix_of_double_sha256() {
        let data = b"checksum me";
        assert_eq!(checksum(data), double_sha256(data)[..4]);
    }
}
