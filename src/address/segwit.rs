//! Bech32 segwit v0 addresses

use bech32::{Fe32, Hrp};

use crate::crypto::HASH160_LEN;

use super::FormatError;

/// Encode a 20-byte witness program as a v0 segwit address
pub fn encode_p2wpkh(hrp: &str, program: &[u8; HASH160_LEN]) -> Result<String, FormatError> {
    let hrp = Hrp::parse(hrp).map_err(|e| FormatError::Bech32(e.to_string()))?;
    bech32::segwit::encode_v0(hrp, program).map_err(|e| FormatError::Bech32(e.to_string()))
}

/// Decode a v0 P2WPKH address for the given human-readable part
///
/// Upper- and lower-case input are both accepted; mixed case is not.
/// Other witness versions and 32-byte programs are rejected.
pub fn decode_p2wpkh(address: &str, expected_hrp: &str) -> Result<[u8; HASH160_LEN], FormatError> {
    let (hrp, version, program) =
        bech32::segwit::decode(address).map_err(|e| FormatError::Bech32(e.to_string()))?;

    if hrp.to_lowercase() != expected_hrp {
        return Err(FormatError::Prefix(hrp.to_lowercase()));
    }
    if version != Fe32::Q {
        return Err(FormatError::WitnessVersion(version.to_u8()));
    }

    program
        .as_slice()
        .try_into()
        .map_err(|_| FormatError::Length(program.len()))
}
