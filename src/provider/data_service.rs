//! Blockchain data service boundary
//!
//! Balances, broadcasting and fee rates come from an external service (an
//! Electrum server, a block explorer API, a full node RPC). This crate only
//! defines the interface and how a handle to it is created lazily.

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

use crate::core::FeeRate;

/// Errors reported by a data service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    #[error("Request rejected: {0}")]
    Rejected(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Chain data operations delegated to an external service
#[async_trait]
pub trait BlockchainDataService: Send + Sync {
    /// Confirmed balance of an address in the chain's base unit
    async fn get_balance(&self, address: &str) -> Result<u64, ServiceError>;

    /// Broadcast a signed, hex-encoded transaction and return its txid
    async fn broadcast(&self, raw_tx_hex: &str) -> Result<String, ServiceError>;

    /// Fee rate expected to confirm within `target_blocks`
    async fn get_fee_rate(&self, target_blocks: u32) -> Result<FeeRate, ServiceError>;
}

/// Shared handle to a data service
pub type SharedDataService = Arc<dyn BlockchainDataService>;

/// Creates the data service handle on first use
pub type DataServiceFactory =
    Arc<dyn Fn() -> BoxFuture<'static, Result<SharedDataService, ServiceError>> + Send + Sync>;

/// Wrap an async constructor as a [`DataServiceFactory`]
pub fn service_factory<F, Fut>(make: F) -> DataServiceFactory
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<SharedDataService, ServiceError>> + Send + 'static,
{
    Arc::new(move || make().boxed())
}

/// Factory for a handle that already exists
pub fn ready_service(service: SharedDataService) -> DataServiceFactory {
    service_factory(move || {
        let service = Arc::clone(&service);
        async move { Ok(service) }
    })
}
