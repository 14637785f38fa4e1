//! Chain providers
//!
//! Compose a chain's address codec with the external blockchain data service.

pub mod chain_provider;
pub mod data_service;

pub use chain_provider::{ChainProvider, ProviderError};
pub use data_service::{
    ready_service, service_factory, BlockchainDataService, DataServiceFactory, ServiceError,
    SharedDataService,
};
