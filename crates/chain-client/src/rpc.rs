//! JSON-RPC client for the chain node.
//!
//! One atomic request-id counter, one `reqwest` client with conservative
//! timeouts. Receipt confirmation is a fixed-interval poll; the node itself
//! owns signing (`eth_sendTransaction` against its managed accounts).

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use shared_types::{Address, Hash, U256};

use crate::error::ChainError;
use crate::types::{JsonRpcRequest, JsonRpcResponse, TransactionReceipt, TransactionRequest};

/// Chain RPC client.
pub struct RpcClient {
    client: Client,
    url: String,
    request_id: std::sync::atomic::AtomicU64,
}

impl RpcClient {
    /// Create a new client against an RPC endpoint URL.
    pub fn new(url: impl Into<String>) -> Result<Self, ChainError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(ChainError::Http)?;

        Ok(Self {
            client,
            url: url.into(),
            request_id: std::sync::atomic::AtomicU64::new(1),
        })
    }

    /// The endpoint this client talks to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the next request ID.
    fn next_id(&self) -> u64 {
        self.request_id
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed)
    }

    /// Call a JSON-RPC method whose result may legitimately be `null`.
    async fn call_opt<P: serde::Serialize, R: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<Option<R>, ChainError> {
        let request = JsonRpcRequest::new(method, params, self.next_id());

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ChainError::Connection(format!("Cannot connect to {}", self.url))
                } else {
                    ChainError::Http(e)
                }
            })?;

        let rpc_response: JsonRpcResponse<R> = response
            .json()
            .await
            .map_err(|e| ChainError::Parse(e.to_string()))?;

        if let Some(error) = rpc_response.error {
            return Err(ChainError::Rpc(error.to_string()));
        }

        Ok(rpc_response.result)
    }

    /// Call a JSON-RPC method that must return a result.
    async fn call<P: serde::Serialize, R: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<R, ChainError> {
        self.call_opt(method, params)
            .await?
            .ok_or_else(|| ChainError::Parse(format!("Missing result for {method}")))
    }

    /// `eth_gasPrice` - the network's current fee rate.
    pub async fn gas_price(&self) -> Result<U256, ChainError> {
        self.call::<[(); 0], U256>("eth_gasPrice", []).await
    }

    /// `eth_accounts` - accounts the node manages and can sign with.
    pub async fn accounts(&self) -> Result<Vec<Address>, ChainError> {
        self.call::<[(); 0], Vec<Address>>("eth_accounts", []).await
    }

    /// `eth_sendTransaction` - submit a transaction signed node-side.
    pub async fn send_transaction(&self, tx: &TransactionRequest) -> Result<Hash, ChainError> {
        self.call("eth_sendTransaction", [tx]).await
    }

    /// `eth_getTransactionReceipt` - `None` until the transaction is mined.
    pub async fn transaction_receipt(
        &self,
        tx: Hash,
    ) -> Result<Option<TransactionReceipt>, ChainError> {
        self.call_opt("eth_getTransactionReceipt", [tx]).await
    }

    /// Poll for a transaction's receipt until it lands or `timeout` elapses.
    ///
    /// The workflow suspends here; nothing else is in flight, so a plain
    /// sleep loop is the whole confirmation story.
    pub async fn wait_for_receipt(
        &self,
        tx: Hash,
        poll_interval: Duration,
        timeout: Duration,
    ) -> Result<TransactionReceipt, ChainError> {
        let started = tokio::time::Instant::now();

        loop {
            if let Some(receipt) = self.transaction_receipt(tx).await? {
                debug!(tx = ?tx, block = ?receipt.block_number, "Receipt landed");
                return Ok(receipt);
            }

            if started.elapsed() >= timeout {
                return Err(ChainError::ConfirmationTimeout {
                    tx,
                    waited_secs: timeout.as_secs(),
                });
            }

            tokio::time::sleep(poll_interval).await;
        }
    }
}
