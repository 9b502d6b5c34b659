//! # Driven Ports (Outbound)
//!
//! Interfaces the deployment pipeline depends on. Adapters implement these
//! over the real chain RPC node and explorer API; tests implement them with
//! mocks. Dependencies point inward: the pipeline never names a transport.

use async_trait::async_trait;
use shared_types::{Address, DeployedContract, U256};

use crate::errors::DeployError;

/// Interface to the chain: fee oracle, deployment, confirmation.
///
/// ## Implementation Notes
///
/// The adapter implementing this trait should:
/// 1. Resolve the signing account (the node owns the keys)
/// 2. Submit the init code as a contract-creation transaction
/// 3. Block until the receipt lands, then surface the new address
#[async_trait]
pub trait ChainProvider: Send + Sync {
    /// Current network gas price.
    async fn gas_price(&self) -> Result<U256, DeployError>;

    /// Deploy a contract and wait for on-chain confirmation.
    ///
    /// # Arguments
    ///
    /// * `name` - contract name, for the returned handle and diagnostics
    /// * `init_code` - creation bytecode plus encoded constructor args
    /// * `gas_price` - fee rate to submit with
    async fn deploy(
        &self,
        name: &str,
        init_code: Vec<u8>,
        gas_price: U256,
    ) -> Result<DeployedContract, DeployError>;
}

/// Interface to the block-explorer verification service.
#[async_trait]
pub trait SourceVerifier: Send + Sync {
    /// Submit a source-verification request for a deployed contract.
    ///
    /// Returns the explorer's submission identifier.
    async fn verify(&self, address: Address, contract_name: &str) -> Result<String, DeployError>;
}
