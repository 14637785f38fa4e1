//! Chain provider
//!
//! Binds a chain code to its address codec and a lazily created data
//! service handle. Address derivation and verification are delegated to the
//! codec; balance, broadcast and fee-rate calls go to the data service.

use thiserror::Error;
use tokio::sync::OnceCell;

use crate::address::{Address, AddressCodec, AddressError, AddressVerification};
use crate::config::ProviderConfig;
use crate::core::{
    ChainError, ChainParams, ChainRegistry, FeeRate, ScriptEncoding, VsizeRequest,
    PLACEHOLDER_VSIZE,
};
use crate::crypto::PubkeyProvider;

use super::data_service::{DataServiceFactory, ServiceError, SharedDataService};

/// Provider-level errors
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),
    #[error("Address error: {0}")]
    Address(#[from] AddressError),
    #[error("Data service error: {0}")]
    Service(#[from] ServiceError),
    #[error("Invalid {chain} address: {address}")]
    InvalidAddress { chain: String, address: String },
}

/// Address and chain-data operations for one chain
pub struct ChainProvider {
    codec: AddressCodec,
    config: ProviderConfig,
    factory: DataServiceFactory,
    service: OnceCell<SharedDataService>,
}

impl ChainProvider {
    /// Provider for one of the built-in chains
    pub fn new(chain_code: &str, factory: DataServiceFactory) -> Result<Self, ProviderError> {
        Self::from_registry(&ChainRegistry::with_presets(), chain_code, factory)
    }

    /// Provider for a chain looked up in `registry`
    pub fn from_registry(
        registry: &ChainRegistry,
        chain_code: &str,
        factory: DataServiceFactory,
    ) -> Result<Self, ProviderError> {
        let params = registry.get(chain_code)?.clone();
        Self::with_params(params, factory)
    }

    pub fn with_params(
        params: ChainParams,
        factory: DataServiceFactory,
    ) -> Result<Self, ProviderError> {
        let codec = AddressCodec::new(params)?;
        Ok(Self {
            codec,
            config: ProviderConfig::default(),
            factory,
            service: OnceCell::new(),
        })
    }

    pub fn with_config(mut self, config: ProviderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn chain_code(&self) -> &str {
        self.codec.chain_code()
    }

    pub fn params(&self) -> &ChainParams {
        self.codec.params()
    }

    pub fn codec(&self) -> &AddressCodec {
        &self.codec
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    // =========================================================================
    // Address operations
    // =========================================================================

    pub async fn pubkey_to_address<P>(
        &self,
        verifier: &P,
        encoding: ScriptEncoding,
    ) -> Result<Address, AddressError>
    where
        P: PubkeyProvider + ?Sized,
    {
        self.codec.pubkey_to_address(verifier, encoding).await
    }

    pub fn verify_address(&self, address: &str) -> AddressVerification {
        self.codec.verify_address(address)
    }

    // =========================================================================
    // Size and fee estimation
    // =========================================================================

    /// Empty size request carrying this provider's OP_RETURN limit
    pub fn vsize_request(&self) -> VsizeRequest {
        VsizeRequest::new().op_return_limit(self.config.op_return_limit)
    }

    /// Vsize estimate; identical for every chain in the family
    pub fn estimate_vsize(&self, request: &VsizeRequest) -> u64 {
        request.estimate()
    }

    /// Absolute fee for a transaction of the given shape
    pub async fn estimate_fee(&self, request: &VsizeRequest) -> Result<u64, ProviderError> {
        let rate = self.fee_rate(self.config.fee_target_blocks).await?;
        Ok(rate.fee_for_vsize(request.estimate()))
    }

    /// Lower-bound fee for a single segwit input
    pub async fn placeholder_fee(&self) -> Result<u64, ProviderError> {
        let rate = self.fee_rate(self.config.fee_target_blocks).await?;
        Ok(rate.fee_for_vsize(PLACEHOLDER_VSIZE))
    }

    // =========================================================================
    // Data service delegation
    // =========================================================================

    /// The data service handle, created on first use
    ///
    /// Concurrent first callers share one construction. A failed construction
    /// is not remembered; the next call tries again.
    pub async fn data_service(&self) -> Result<&SharedDataService, ServiceError> {
        self.service
            .get_or_try_init(|| async {
                log::info!("Connecting data service for {}", self.chain_code());
                (self.factory)().await
            })
            .await
    }

    /// Balance of a valid address, queried in its normalized form
    pub async fn get_balance(&self, address: &str) -> Result<u64, ProviderError> {
        let verification = self.verify_address(address);
        let normalized = match verification.normalized_address {
            Some(normalized) if verification.is_valid => normalized,
            _ => {
                return Err(ProviderError::InvalidAddress {
                    chain: self.chain_code().to_string(),
                    address: address.to_string(),
                })
            }
        };

        let service = self.data_service().await?;
        Ok(service.get_balance(&normalized).await?)
    }

    pub async fn broadcast(&self, raw_tx_hex: &str) -> Result<String, ProviderError> {
        let service = self.data_service().await?;
        let txid = service.broadcast(raw_tx_hex).await?;
        log::info!("Broadcast {} transaction {}", self.chain_code(), txid);
        Ok(txid)
    }

    pub async fn fee_rate(&self, target_blocks: u32) -> Result<FeeRate, ProviderError> {
        let service = self.data_service().await?;
        Ok(service.get_fee_rate(target_blocks).await?)
    }
}
