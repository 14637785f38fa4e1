//! Script encodings
//!
//! The set of output script templates an address can stand for. Address
//! derivation only ever works with [`ScriptEncoding`]; size estimation accepts
//! free-form [`EncodingTag`]s so callers can pass whatever tags they carry.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a tag does not name a known script encoding
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown script encoding: {0}")]
pub struct UnknownEncoding(pub String);

/// Output script template behind an address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScriptEncoding {
    /// Pay to Public Key Hash
    #[serde(rename = "P2PKH")]
    P2pkh,
    /// Native segwit v0 Pay to Witness Public Key Hash
    #[serde(rename = "P2WPKH")]
    P2wpkh,
    /// P2WPKH wrapped in a P2SH redeem script
    #[serde(rename = "P2SH-P2WPKH")]
    P2shP2wpkh,
}

impl ScriptEncoding {
    pub const ALL: [ScriptEncoding; 3] = [
        ScriptEncoding::P2pkh,
        ScriptEncoding::P2wpkh,
        ScriptEncoding::P2shP2wpkh,
    ];

    /// Canonical textual tag
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptEncoding::P2pkh => "P2PKH",
            ScriptEncoding::P2wpkh => "P2WPKH",
            ScriptEncoding::P2shP2wpkh => "P2SH-P2WPKH",
        }
    }

    /// Spent through witness data without a legacy script wrapper
    pub fn is_native_segwit(&self) -> bool {
        match self {
            ScriptEncoding::P2wpkh => true,
            ScriptEncoding::P2pkh | ScriptEncoding::P2shP2wpkh => false,
        }
    }
}

impl fmt::Display for ScriptEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScriptEncoding {
    type Err = UnknownEncoding;

    /// Tags match exactly; `"p2pkh"` is not `"P2PKH"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScriptEncoding::ALL
            .into_iter()
            .find(|encoding| encoding.as_str() == s)
            .ok_or_else(|| UnknownEncoding(s.to_string()))
    }
}

/// A possibly unknown encoding tag, as accepted by size estimation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EncodingTag {
    Known(ScriptEncoding),
    Unknown(String),
}

impl EncodingTag {
    pub fn known(&self) -> Option<ScriptEncoding> {
        match self {
            EncodingTag::Known(encoding) => Some(*encoding),
            EncodingTag::Unknown(_) => None,
        }
    }
}

impl From<ScriptEncoding> for EncodingTag {
    fn from(encoding: ScriptEncoding) -> Self {
        EncodingTag::Known(encoding)
    }
}

impl From<&str> for EncodingTag {
    fn from(s: &str) -> Self {
        match s.parse::<ScriptEncoding>() {
            Ok(encoding) => EncodingTag::Known(encoding),
            Err(UnknownEncoding(tag)) => EncodingTag::Unknown(tag),
        }
    }
}

impl FromStr for EncodingTag {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(EncodingTag::from(s))
    }
}

impl fmt::Display for EncodingTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingTag::Known(encoding) => encoding.fmt(f),
            EncodingTag::Unknown(tag) => f.write_str(tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tags() {
        for encoding in ScriptEncoding::ALL {
            assert_eq!(encoding.as_str().parse::<ScriptEncoding>(), Ok(encoding));
        }
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        assert!("p2wpkh".parse::<ScriptEncoding>().is_err());
        assert_eq!(
            EncodingTag::from("p2wpkh"),
            EncodingTag::Unknown("p2wpkh".to_string())
        );
    }

    #[test]
    fn test_serde_uses_canonical_tags() {
        let json = serde_json::to_string(&ScriptEncoding::P2shP2wpkh).unwrap();
        assert_eq!(json, "\"P2SH-P2WPKH\"");
        let back: ScriptEncoding = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ScriptEncoding::P2shP2wpkh);
    }

    #[test]
    fn test_only_p2wpkh_is_native_segwit() {
        assert!(ScriptEncoding::P2wpkh.is_native_segwit());
        assert!(!ScriptEncoding::P2shP2wpkh.is_native_segwit());
        assert!(!ScriptEncoding::P2pkh.is_native_segwit());
    }
}
