//! Port implementations over the `chain-client` crate.
//!
//! `RpcChainProvider` turns the pipeline's deploy step into
//! `eth_sendTransaction` + receipt polling against a node-managed account.
//! `EtherscanVerifier` shapes the explorer's form request from the compiler
//! configuration and the contract's source file.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use chain_client::{ChainError, ExplorerClient, RpcClient, TransactionRequest, VerifyRequest};
use shared_types::{Address, DeployedContract, U256};

use crate::config::CompilerConfig;
use crate::errors::DeployError;
use crate::ports::{ChainProvider, SourceVerifier};

/// How often to ask the node for a pending receipt.
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// How long to wait for a deployment to confirm before giving up.
const CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(180);

/// Chain provider over a JSON-RPC node with managed accounts.
pub struct RpcChainProvider {
    rpc: RpcClient,
    network: String,
}

impl RpcChainProvider {
    pub fn new(rpc: RpcClient, network: impl Into<String>) -> Self {
        Self {
            rpc,
            network: network.into(),
        }
    }

    /// Resolve the sending account from the node's managed accounts.
    ///
    /// Signing is the node's concern; a node with no unlocked account
    /// cannot deploy, and that is the moment the missing credential
    /// surfaces.
    async fn sender(&self) -> Result<Address, DeployError> {
        let accounts = self.rpc.accounts().await?;
        accounts
            .first()
            .copied()
            .ok_or_else(|| DeployError::MissingSigner {
                network: self.network.clone(),
            })
    }
}

#[async_trait]
impl ChainProvider for RpcChainProvider {
    async fn gas_price(&self) -> Result<U256, DeployError> {
        Ok(self.rpc.gas_price().await?)
    }

    async fn deploy(
        &self,
        name: &str,
        init_code: Vec<u8>,
        gas_price: U256,
    ) -> Result<DeployedContract, DeployError> {
        let from = self.sender().await?;
        let tx = TransactionRequest::deploy(from, &init_code, Some(gas_price));

        debug!(contract = name, bytes = init_code.len(), "Submitting deployment");
        let tx_hash = self.rpc.send_transaction(&tx).await?;

        let receipt = self
            .rpc
            .wait_for_receipt(tx_hash, RECEIPT_POLL_INTERVAL, CONFIRMATION_TIMEOUT)
            .await?;

        if !receipt.succeeded() {
            return Err(ChainError::Rejected { tx: tx_hash }.into());
        }

        let address = receipt
            .contract_address
            .ok_or(ChainError::MissingContractAddress { tx: tx_hash })?;

        info!(contract = name, address = ?address, "Deployment confirmed");

        Ok(DeployedContract {
            name: name.to_string(),
            address,
            transaction_hash: tx_hash,
            gas_used: receipt.gas_used,
        })
    }
}

/// Source verifier over the etherscan-style explorer API.
pub struct EtherscanVerifier {
    explorer: ExplorerClient,
    compiler: CompilerConfig,
    source_dir: PathBuf,
}

impl EtherscanVerifier {
    pub fn new(explorer: ExplorerClient, compiler: CompilerConfig, source_dir: impl Into<PathBuf>) -> Self {
        Self {
            explorer,
            compiler,
            source_dir: source_dir.into(),
        }
    }

    /// Read the flattened source for a contract from the source directory.
    fn read_source(&self, contract_name: &str) -> Result<String, DeployError> {
        let path = self.source_dir.join(format!("{contract_name}.sol"));
        std::fs::read_to_string(&path).map_err(|e| DeployError::MissingSource {
            contract: contract_name.to_string(),
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl SourceVerifier for EtherscanVerifier {
    async fn verify(&self, address: Address, contract_name: &str) -> Result<String, DeployError> {
        let source_code = self.read_source(contract_name)?;

        let request = VerifyRequest {
            contract_address: address,
            contract_name: contract_name.to_string(),
            source_code,
            compiler_version: self.compiler.version_tag(),
            optimization_used: self.compiler.optimizer.enabled,
            optimizer_runs: self.compiler.optimizer.runs,
        };

        Ok(self.explorer.verify_source(&request).await?)
    }
}
