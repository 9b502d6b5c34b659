//! Errors from the chain RPC collaborator.

use shared_types::Hash;
use thiserror::Error;

/// Errors that can occur when communicating with the chain RPC node.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("JSON-RPC error: {0}")]
    Rpc(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The node accepted the transaction but no receipt landed in time.
    #[error("Transaction {tx:#x} not confirmed after {waited_secs}s")]
    ConfirmationTimeout { tx: Hash, waited_secs: u64 },

    /// Receipt arrived with a failure status.
    #[error("Transaction {tx:#x} was rejected by the network")]
    Rejected { tx: Hash },

    /// A contract-creation receipt is required to carry the new address.
    #[error("Receipt for {tx:#x} carries no contract address")]
    MissingContractAddress { tx: Hash },
}
