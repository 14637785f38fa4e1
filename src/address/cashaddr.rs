//! CashAddr encoding
//!
//! Format: `prefix:payload` where the payload is the base32 encoding of a
//! version byte and hash followed by a 40-bit BCH checksum over the prefix
//! and payload. The prefix may be omitted when it is implied by the chain.

use crate::crypto::HASH160_LEN;

use super::FormatError;

const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

const CHECKSUM_SYMBOLS: usize = 8;

/// Version byte size code for 160-bit hashes
const SIZE_CODE_160: u8 = 0;

/// Kind of hash carried in a CashAddr payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CashAddrKind {
    PubkeyHash,
    ScriptHash,
}

impl CashAddrKind {
    fn type_bits(self) -> u8 {
        match self {
            CashAddrKind::PubkeyHash => 0,
            CashAddrKind::ScriptHash => 1,
        }
    }

    fn from_type_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(CashAddrKind::PubkeyHash),
            1 => Some(CashAddrKind::ScriptHash),
            _ => None,
        }
    }
}

/// A decoded CashAddr address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CashAddrPayload {
    pub kind: CashAddrKind,
    pub hash: [u8; HASH160_LEN],
}

fn polymod(values: impl IntoIterator<Item = u8>) -> u64 {
    const GENERATORS: [u64; 5] = [
        0x98f2bc8e61,
        0x79b76d99e2,
        0xf33e5fb3c4,
        0xae2eabe2a8,
        0x1e4f43e470,
    ];

    let mut c: u64 = 1;
    for value in values {
        let c0 = (c >> 35) as u8;
        c = ((c & 0x07_ffff_ffff) << 5) ^ u64::from(value);
        for (bit, generator) in GENERATORS.iter().enumerate() {
            if c0 & (1 << bit) != 0 {
                c ^= generator;
            }
        }
    }
    c ^ 1
}

/// Lower five bits of each prefix character followed by the separator zero
fn prefix_values(prefix: &str) -> impl Iterator<Item = u8> + '_ {
    prefix.bytes().map(|b| b & 0x1f).chain(std::iter::once(0))
}

fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Option<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let max_value = (1u32 << to) - 1;
    let mut out = Vec::with_capacity(data.len() * from as usize / to as usize + 1);

    for &value in data {
        if u32::from(value) >> from != 0 {
            return None;
        }
        acc = (acc << from) | u32::from(value);
        bits += from;
        while bits >= to {
            bits -= to;
            out.push(((acc >> bits) & max_value) as u8);
        }
    }

    if pad {
        if bits > 0 {
            out.push(((acc << (to - bits)) & max_value) as u8);
        }
    } else if bits >= from || ((acc << (to - bits)) & max_value) != 0 {
        return None;
    }

    Some(out)
}

/// Encode a 20-byte hash as a prefixed, lower-case CashAddr address
pub fn encode(prefix: &str, kind: CashAddrKind, hash: &[u8; HASH160_LEN]) -> String {
    let mut payload = Vec::with_capacity(1 + HASH160_LEN);
    payload.push((kind.type_bits() << 3) | SIZE_CODE_160);
    payload.extend_from_slice(hash);

    let mut values = convert_bits(&payload, 8, 5, true).unwrap_or_default();
    let checksum = polymod(
        prefix_values(prefix)
            .chain(values.iter().copied())
            .chain([0u8; CHECKSUM_SYMBOLS]),
    );
    for i in 0..CHECKSUM_SYMBOLS {
        values.push(((checksum >> (5 * (CHECKSUM_SYMBOLS - 1 - i))) & 0x1f) as u8);
    }

    let mut out = String::with_capacity(prefix.len() + 1 + values.len());
    out.push_str(prefix);
    out.push(':');
    out.extend(values.iter().map(|&v| CHARSET[v as usize] as char));
    out
}

/// Decode a CashAddr address for the given prefix
///
/// The prefix may be omitted. Input must be entirely lower- or upper-case.
pub fn decode(address: &str, expected_prefix: &str) -> Result<CashAddrPayload, FormatError> {
    let has_lower = address.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = address.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(FormatError::MixedCase);
    }
    let address = address.to_ascii_lowercase();

    let (prefix, body) = match address.rsplit_once(':') {
        Some((prefix, body)) => (prefix, body),
        None => (expected_prefix, address.as_str()),
    };
    if prefix != expected_prefix {
        return Err(FormatError::Prefix(prefix.to_string()));
    }
    if body.len() <= CHECKSUM_SYMBOLS {
        return Err(FormatError::Length(body.len()));
    }

    let values = body
        .bytes()
        .map(|b| {
            CHARSET
                .iter()
                .position(|&c| c == b)
                .map(|p| p as u8)
                .ok_or(FormatError::Character(b as char))
        })
        .collect::<Result<Vec<u8>, _>>()?;

    if polymod(prefix_values(prefix).chain(values.iter().copied())) != 0 {
        return Err(FormatError::Checksum);
    }

    let data = &values[..values.len() - CHECKSUM_SYMBOLS];
    let payload = convert_bits(data, 5, 8, false).ok_or(FormatError::Padding)?;
    let (&version, hash) = payload.split_first().ok_or(FormatError::Length(0))?;

    if version & 0x80 != 0 || version & 0x07 != SIZE_CODE_160 {
        return Err(FormatError::Version(version));
    }
    let kind = CashAddrKind::from_type_bits((version >> 3) & 0x0f)
        .ok_or(FormatError::Version(version))?;
    let hash: [u8; HASH160_LEN] = hash
        .try_into()
        .map_err(|_| FormatError::Length(hash.len()))?;

    Ok(CashAddrPayload { kind, hash })
}
