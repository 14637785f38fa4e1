//! Chain-parameterized address codec
//!
//! One [`AddressCodec`] serves every chain; the [`ChainParams`] it is built
//! with decide the version bytes, the textual schemes tried during
//! verification and the encodings that can be derived.
//!
//! Normalization conventions:
//! - Segwit chains: bech32 addresses are lower-cased, Base58Check addresses
//!   are kept as-is. Display and normalized forms are the same.
//! - CashAddr chains: the normalized form is always the lower-case,
//!   prefixed CashAddr string. The display form is that same string for
//!   CashAddr input and the original Base58Check string for legacy input.
//! - Legacy chains: Base58Check only, display equals normalized.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::core::{AddressScheme, ChainError, ChainParams, ScriptEncoding};
use crate::crypto::{hash160, KeyError, PubkeyProvider, PublicKey, VerifierError, HASH160_LEN};

use super::cashaddr::{self, CashAddrKind};
use super::{base58check, segwit, FormatError};

/// Longest string considered for decoding; anything longer is rejected outright
pub const MAX_ADDRESS_LEN: usize = 128;

/// Errors raised while deriving an address from a public key
#[derive(Error, Debug)]
pub enum AddressError {
    #[error("Encoding {encoding} is not supported on chain {chain}")]
    UnsupportedEncoding {
        chain: String,
        encoding: ScriptEncoding,
    },
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(#[from] KeyError),
    #[error("Public key provider failed: {0}")]
    Verifier(#[source] VerifierError),
    #[error("Address encoding failed: {0}")]
    Format(#[from] FormatError),
}

/// An address derived for a specific chain and encoding
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Address {
    address: String,
    encoding: ScriptEncoding,
    chain: String,
}

impl Address {
    pub fn as_str(&self) -> &str {
        &self.address
    }

    pub fn encoding(&self) -> ScriptEncoding {
        self.encoding
    }

    /// Code of the chain this address belongs to
    pub fn chain(&self) -> &str {
        &self.chain
    }

    pub fn into_string(self) -> String {
        self.address
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.address
    }
}

/// Outcome of checking an address string against a chain
///
/// Invalid results carry no other fields and serialize as `{"isValid":false}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressVerification {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<ScriptEncoding>,
}

impl AddressVerification {
    pub fn invalid() -> Self {
        Self {
            is_valid: false,
            display_address: None,
            normalized_address: None,
            encoding: None,
        }
    }

    pub fn valid(display: String, normalized: String, encoding: ScriptEncoding) -> Self {
        Self {
            is_valid: true,
            display_address: Some(display),
            normalized_address: Some(normalized),
            encoding: Some(encoding),
        }
    }
}

/// A successful parse under one address format
struct Match {
    display: String,
    normalized: String,
    encoding: ScriptEncoding,
}

/// Textual formats, listed in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Bech32,
    CashAddr,
    Base58,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Bech32 => "bech32",
            Format::CashAddr => "cashaddr",
            Format::Base58 => "base58check",
        };
        f.write_str(name)
    }
}

/// Address codec for one chain
#[derive(Debug, Clone)]
pub struct AddressCodec {
    params: ChainParams,
}

impl AddressCodec {
    /// Build a codec, rejecting inconsistent parameters
    pub fn new(params: ChainParams) -> Result<Self, ChainError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ChainParams {
        &self.params
    }

    pub fn chain_code(&self) -> &str {
        &self.params.code
    }

    fn ensure_supported(&self, encoding: ScriptEncoding) -> Result<(), AddressError> {
        if self.params.supports(encoding) {
            Ok(())
        } else {
            Err(AddressError::UnsupportedEncoding {
                chain: self.params.code.clone(),
                encoding,
            })
        }
    }

    /// Derive the address of an already fetched public key
    pub fn encode_pubkey(
        &self,
        pubkey: &PublicKey,
        encoding: ScriptEncoding,
    ) -> Result<Address, AddressError> {
        self.ensure_supported(encoding)?;

        let address = match encoding {
            ScriptEncoding::P2pkh => match &self.params.scheme {
                AddressScheme::CashAddr { prefix } => {
                    cashaddr::encode(prefix, CashAddrKind::PubkeyHash, &pubkey.hash160())
                }
                AddressScheme::Segwit { .. } | AddressScheme::Legacy => {
                    base58check::encode(self.params.pubkey_hash_version, &pubkey.hash160())
                }
            },
            ScriptEncoding::P2wpkh => match &self.params.scheme {
                AddressScheme::Segwit { hrp } => {
                    segwit::encode_p2wpkh(hrp, &pubkey.compressed_hash160())?
                }
                AddressScheme::CashAddr { .. } | AddressScheme::Legacy => {
                    return Err(AddressError::UnsupportedEncoding {
                        chain: self.params.code.clone(),
                        encoding,
                    })
                }
            },
            ScriptEncoding::P2shP2wpkh => base58check::encode(
                self.params.script_hash_version,
                &p2wpkh_redeem_script_hash(pubkey),
            ),
        };

        log::debug!(
            "Derived {} {} address {}",
            self.params.code,
            encoding,
            address
        );

        Ok(Address {
            address,
            encoding,
            chain: self.params.code.clone(),
        })
    }

    /// Fetch the public key from `verifier` and derive its address
    ///
    /// Unsupported encodings are rejected before the key is requested.
    /// Provider failures are returned as [`AddressError::Verifier`] wrapping
    /// the provider's own error.
    pub async fn pubkey_to_address<P>(
        &self,
        verifier: &P,
        encoding: ScriptEncoding,
    ) -> Result<Address, AddressError>
    where
        P: PubkeyProvider + ?Sized,
    {
        self.ensure_supported(encoding)?;
        let bytes = verifier
            .get_pubkey()
            .await
            .map_err(AddressError::Verifier)?;
        let pubkey = PublicKey::from_slice(&bytes)?;
        self.encode_pubkey(&pubkey, encoding)
    }

    /// Check an address string against this chain
    ///
    /// Never fails: anything that does not parse under one of the chain's
    /// formats to one of its supported encodings is reported as invalid.
    pub fn verify_address(&self, address: &str) -> AddressVerification {
        if address.is_empty() || address.len() > MAX_ADDRESS_LEN {
            return AddressVerification::invalid();
        }

        for format in self.formats() {
            let result = match format {
                Format::Bech32 => self.try_bech32(address),
                Format::CashAddr => self.try_cashaddr(address),
                Format::Base58 => self.try_base58(address),
            };

            match result {
                Ok(Some(found)) => {
                    return AddressVerification::valid(
                        found.display,
                        found.normalized,
                        found.encoding,
                    )
                }
                Ok(None) => {
                    log::debug!(
                        "{} address {} decodes as {} but carries an unsupported script type",
                        self.params.code,
                        address,
                        format
                    );
                }
                Err(e) => {
                    log::trace!(
                        "{} address {} is not {}: {}",
                        self.params.code,
                        address,
                        format,
                        e
                    );
                }
            }
        }

        AddressVerification::invalid()
    }

    /// The chain's native format first, Base58Check as the fallback
    fn formats(&self) -> &'static [Format] {
        match self.params.scheme {
            AddressScheme::Segwit { .. } => &[Format::Bech32, Format::Base58],
            AddressScheme::CashAddr { .. } => &[Format::CashAddr, Format::Base58],
            AddressScheme::Legacy => &[Format::Base58],
        }
    }

    fn supported(&self, encoding: ScriptEncoding) -> Option<ScriptEncoding> {
        self.params.supports(encoding).then_some(encoding)
    }

    fn try_bech32(&self, address: &str) -> Result<Option<Match>, FormatError> {
        let AddressScheme::Segwit { hrp } = &self.params.scheme else {
            return Ok(None);
        };
        let program = segwit::decode_p2wpkh(address, hrp)?;
        let Some(encoding) = self.supported(ScriptEncoding::P2wpkh) else {
            return Ok(None);
        };
        let canonical = segwit::encode_p2wpkh(hrp, &program)?;
        Ok(Some(Match {
            display: canonical.clone(),
            normalized: canonical,
            encoding,
        }))
    }

    fn try_cashaddr(&self, address: &str) -> Result<Option<Match>, FormatError> {
        let AddressScheme::CashAddr { prefix } = &self.params.scheme else {
            return Ok(None);
        };
        let payload = cashaddr::decode(address, prefix)?;
        let encoding = match payload.kind {
            CashAddrKind::PubkeyHash => self.supported(ScriptEncoding::P2pkh),
            CashAddrKind::ScriptHash => None,
        };
        let Some(encoding) = encoding else {
            return Ok(None);
        };
        let canonical = cashaddr::encode(prefix, payload.kind, &payload.hash);
        Ok(Some(Match {
            display: canonical.clone(),
            normalized: canonical,
            encoding,
        }))
    }

    fn try_base58(&self, address: &str) -> Result<Option<Match>, FormatError> {
        let payload = base58check::decode(address)?;

        let encoding = if payload.version == self.params.pubkey_hash_version {
            ScriptEncoding::P2pkh
        } else if payload.version == self.params.script_hash_version {
            // P2SH hides its redeem script; wrapped segwit is the only P2SH
            // template these chains derive
            ScriptEncoding::P2shP2wpkh
        } else {
            return Err(FormatError::Version(payload.version));
        };
        let Some(encoding) = self.supported(encoding) else {
            return Ok(None);
        };

        let display = base58check::encode(payload.version, &payload.hash);
        let normalized = match (&self.params.scheme, encoding) {
            (AddressScheme::CashAddr { prefix }, ScriptEncoding::P2pkh) => {
                cashaddr::encode(prefix, CashAddrKind::PubkeyHash, &payload.hash)
            }
            _ => display.clone(),
        };

        Ok(Some(Match {
            display,
            normalized,
            encoding,
        }))
    }
}

/// HASH160 of the `OP_0 <20-byte key hash>` redeem script
fn p2wpkh_redeem_script_hash(pubkey: &PublicKey) -> [u8; HASH160_LEN] {
    let mut redeem_script = Vec::with_capacity(2 + HASH160_LEN);
    redeem_script.push(0x00);
    redeem_script.push(HASH160_LEN as u8);
    redeem_script.extend_from_slice(&pubkey.compressed_hash160());
    hash160(&redeem_script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::StaticPubkey;
    use async_trait::async_trait;
    use rand::{Rng, RngCore};
    use secp256k1::Secp256k1;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const GENERATOR_COMPRESSED: &str =
        "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const GENERATOR_UNCOMPRESSED: &str = "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

    fn codec(params: ChainParams) -> AddressCodec {
        AddressCodec::new(params).unwrap()
    }

    fn generator() -> StaticPubkey {
        StaticPubkey::from_hex(GENERATOR_COMPRESSED).unwrap()
    }

    struct FailingProvider;

    #[async_trait]
    impl PubkeyProvider for FailingProvider {
        async fn get_pubkey(&self) -> Result<Vec<u8>, VerifierError> {
            Err("signer offline".into())
        }
    }

    struct CountingProvider {
        inner: StaticPubkey,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PubkeyProvider for CountingProvider {
        async fn get_pubkey(&self) -> Result<Vec<u8>, VerifierError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.get_pubkey().await
        }
    }

    #[tokio::test]
    async fn test_bitcoin_known_addresses() {
        let btc = codec(ChainParams::bitcoin());
        let key = generator();

        let p2pkh = btc.pubkey_to_address(&key, ScriptEncoding::P2pkh).await.unwrap();
        assert_eq!(p2pkh.as_str(), "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
        assert_eq!(p2pkh.encoding(), ScriptEncoding::P2pkh);
        assert_eq!(p2pkh.chain(), "BTC");

        let p2wpkh = btc.pubkey_to_address(&key, ScriptEncoding::P2wpkh).await.unwrap();
        assert_eq!(p2wpkh.as_str(), "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4");

        let wrapped = btc
            .pubkey_to_address(&key, ScriptEncoding::P2shP2wpkh)
            .await
            .unwrap();
        assert_eq!(wrapped.as_str(), "3JvL6Ymt8MVWiCNHC7oWU6nLeHNJKLZGLN");
        assert_eq!(wrapped.encoding(), ScriptEncoding::P2shP2wpkh);
    }

    #[tokio::test]
    async fn test_known_addresses_on_other_chains() {
        let key = generator();
        let cases = [
            (ChainParams::litecoin(), ScriptEncoding::P2pkh, "LVuDpNCSSj6pQ7t9Pv6d6sUkLKoqDEVUnJ"),
            (
                ChainParams::litecoin(),
                ScriptEncoding::P2wpkh,
                "ltc1qw508d6qejxtdg4y5r3zarvary0c5xw7kgmn4n9",
            ),
            (ChainParams::litecoin(), ScriptEncoding::P2shP2wpkh, "MR8UQSBr5ULwWheBHznrHk2jxyxkHQu8vB"),
            (ChainParams::bitcoin_testnet(), ScriptEncoding::P2pkh, "mrCDrCybB6J1vRfbwM5hemdJz73FwDBC8r"),
            (
                ChainParams::bitcoin_testnet(),
                ScriptEncoding::P2shP2wpkh,
                "2NAUYAHhujozruyzpsFRP63mbrdaU5wnEpN",
            ),
            (ChainParams::dogecoin(), ScriptEncoding::P2pkh, "DFpN6QqFfUm3gKNaxN6tNcab1FArL9cZLE"),
        ];

        for (params, encoding, expected) in cases {
            let codec = codec(params);
            let address = codec.pubkey_to_address(&key, encoding).await.unwrap();
            assert_eq!(address.as_str(), expected, "{} {}", codec.params().code, encoding);

            let result = codec.verify_address(expected);
            assert!(result.is_valid);
            assert_eq!(result.encoding, Some(encoding));
        }
    }

    #[tokio::test]
    async fn test_uncompressed_key() {
        let btc = codec(ChainParams::bitcoin());
        let key = StaticPubkey::from_hex(GENERATOR_UNCOMPRESSED).unwrap();

        let p2pkh = btc.pubkey_to_address(&key, ScriptEncoding::P2pkh).await.unwrap();
        assert_eq!(p2pkh.as_str(), "1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm");

        // Segwit always commits to the compressed key
        let p2wpkh = btc.pubkey_to_address(&key, ScriptEncoding::P2wpkh).await.unwrap();
        assert_eq!(p2wpkh.as_str(), "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4");
    }

    #[tokio::test]
    async fn test_fork_produces_distinct_valid_addresses() {
        let btc = codec(ChainParams::bitcoin());
        let bch = codec(ChainParams::bitcoin_cash());
        let key = generator();

        let btc_address = btc.pubkey_to_address(&key, ScriptEncoding::P2pkh).await.unwrap();
        let bch_address = bch.pubkey_to_address(&key, ScriptEncoding::P2pkh).await.unwrap();

        assert_ne!(btc_address.as_str(), bch_address.as_str());
        assert!(bch_address.as_str().starts_with("bitcoincash:q"));
        assert!(btc.verify_address(btc_address.as_str()).is_valid);
        assert!(bch.verify_address(bch_address.as_str()).is_valid);
        assert!(!btc.verify_address(bch_address.as_str()).is_valid);
    }

    #[tokio::test]
    async fn test_unsupported_encoding_skips_key_fetch() {
        let bch = codec(ChainParams::bitcoin_cash());
        let provider = CountingProvider {
            inner: generator(),
            calls: AtomicUsize::new(0),
        };

        let err = bch
            .pubkey_to_address(&provider, ScriptEncoding::P2wpkh)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AddressError::UnsupportedEncoding {
                encoding: ScriptEncoding::P2wpkh,
                ..
            }
        ));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);

        bch.pubkey_to_address(&provider, ScriptEncoding::P2pkh)
            .await
            .unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_provider_error_is_passed_through() {
        let btc = codec(ChainParams::bitcoin());
        let err = btc
            .pubkey_to_address(&FailingProvider, ScriptEncoding::P2pkh)
            .await
            .unwrap_err();

        match err {
            AddressError::Verifier(source) => assert_eq!(source.to_string(), "signer offline"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_key_bytes() {
        let btc = codec(ChainParams::bitcoin());
        let provider = StaticPubkey::new(vec![0x02; 10]);
        let err = btc
            .pubkey_to_address(&provider, ScriptEncoding::P2pkh)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AddressError::InvalidPublicKey(KeyError::InvalidLength(10))
        ));
    }

    #[test]
    fn test_bitcoin_verify_forms() {
        let btc = codec(ChainParams::bitcoin());

        let upper = btc.verify_address("BC1QW508D6QEJXTDG4Y5R3ZARVARY0C5XW7KV8F3T4");
        assert_eq!(
            upper,
            AddressVerification::valid(
                "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4".to_string(),
                "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4".to_string(),
                ScriptEncoding::P2wpkh,
            )
        );

        let legacy = btc.verify_address("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
        assert_eq!(legacy.encoding, Some(ScriptEncoding::P2pkh));
        assert_eq!(
            legacy.normalized_address.as_deref(),
            Some("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH")
        );
    }

    #[test]
    fn test_bitcoin_cash_legacy_and_cashaddr_forms() {
        let bch = codec(ChainParams::bitcoin_cash());
        let cash = "bitcoincash:qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a";

        let from_legacy = bch.verify_address("1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggu");
        assert_eq!(
            from_legacy,
            AddressVerification::valid(
                "1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggu".to_string(),
                cash.to_string(),
                ScriptEncoding::P2pkh,
            )
        );

        for input in [
            cash,
            "qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a",
            "BITCOINCASH:QPM2QSZNHKS23Z7629MMS6S4CWEF74VCWVY22GDX6A",
        ] {
            let result = bch.verify_address(input);
            assert_eq!(result.display_address.as_deref(), Some(cash));
            assert_eq!(result.normalized_address.as_deref(), Some(cash));
        }
    }

    #[test]
    fn test_p2sh_is_invalid_where_not_derivable() {
        let bch = codec(ChainParams::bitcoin_cash());
        let script = cashaddr::encode("bitcoincash", CashAddrKind::ScriptHash, &[7u8; 20]);
        assert_eq!(bch.verify_address(&script), AddressVerification::invalid());
        let legacy_p2sh = base58check::encode(0x05, &[7u8; 20]);
        assert_eq!(bch.verify_address(&legacy_p2sh), AddressVerification::invalid());

        let btc = codec(ChainParams::bitcoin());
        assert_eq!(
            btc.verify_address(&legacy_p2sh).encoding,
            Some(ScriptEncoding::P2shP2wpkh)
        );
    }

    #[test]
    fn test_invalid_inputs_serialize_bare() {
        let btc = codec(ChainParams::bitcoin());
        let bch = codec(ChainParams::bitcoin_cash());

        let too_long = "1".repeat(MAX_ADDRESS_LEN + 1);
        let cases: Vec<(&AddressCodec, &str)> = vec![
            (&btc, ""),
            (&btc, "not an address"),
            // Bad checksum
            (&btc, "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMJ"),
            (&btc, "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t5"),
            // Testnet and Litecoin addresses on Bitcoin
            (&btc, "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx"),
            (&btc, "bitcoincash:qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a"),
            (&bch, "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4"),
            (&bch, "bchtest:qpm2qsznhks23z7629mms6s4cwef74vcwvqcw003ap"),
            (&btc, too_long.as_str()),
        ];

        for (codec, input) in cases {
            let result = codec.verify_address(input);
            assert_eq!(result, AddressVerification::invalid(), "input {input:?}");
            assert_eq!(serde_json::to_string(&result).unwrap(), r#"{"isValid":false}"#);
        }
    }

    #[test]
    fn test_litecoin_address_is_foreign_to_bitcoin() {
        let ltc = codec(ChainParams::litecoin());
        let btc = codec(ChainParams::bitcoin());
        let key = PublicKey::from_hex(GENERATOR_COMPRESSED).unwrap();

        for encoding in ScriptEncoding::ALL {
            let address = ltc.encode_pubkey(&key, encoding).unwrap();
            assert!(ltc.verify_address(address.as_str()).is_valid);
            assert!(!btc.verify_address(address.as_str()).is_valid);
        }
    }

    #[test]
    fn test_valid_result_serializes_camel_case() {
        let btc = codec(ChainParams::bitcoin());
        let json = serde_json::to_value(btc.verify_address("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"))
            .unwrap();
        assert_eq!(json["isValid"], true);
        assert_eq!(json["displayAddress"], "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
        assert_eq!(json["normalizedAddress"], "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
        assert_eq!(json["encoding"], "P2PKH");
    }

    #[tokio::test]
    async fn test_round_trip_every_chain_and_encoding() {
        let secp = Secp256k1::new();
        let mut rng = rand::thread_rng();

        for params in ChainParams::presets() {
            let codec = codec(params.clone());
            for _ in 0..8 {
                let (_, point) = secp.generate_keypair(&mut rng);
                let bytes = if rng.gen_bool(0.5) {
                    point.serialize().to_vec()
                } else {
                    point.serialize_uncompressed().to_vec()
                };
                let provider = StaticPubkey::new(bytes);

                for encoding in params.supported_encodings.iter().copied() {
                    let address = codec.pubkey_to_address(&provider, encoding).await.unwrap();
                    let first = codec.verify_address(address.as_str());

                    assert!(first.is_valid, "{} {} {}", params.code, encoding, address);
                    assert_eq!(first.encoding, Some(encoding));
                    assert_eq!(first.normalized_address.as_deref(), Some(address.as_str()));

                    let normalized = first.normalized_address.clone().unwrap();
                    let second = codec.verify_address(&normalized);
                    assert_eq!(second.normalized_address, first.normalized_address);
                    assert_eq!(second.encoding, first.encoding);
                }
            }
        }
    }

    #[test]
    fn test_verify_never_panics_on_noise() {
        let mut rng = rand::thread_rng();
        let codecs: Vec<AddressCodec> = ChainParams::presets().into_iter().map(codec).collect();

        for _ in 0..200 {
            let len = rng.gen_range(0..80);
            let mut raw = vec![0u8; len];
            rng.fill_bytes(&mut raw);
            let noise = String::from_utf8_lossy(&raw).into_owned();
            for codec in &codecs {
                let result = codec.verify_address(&noise);
                if !result.is_valid {
                    assert_eq!(result, AddressVerification::invalid());
                }
            }
        }
    }
}
