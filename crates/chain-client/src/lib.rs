//! # Chain Client
//!
//! Clients for the remote collaborators the deploy pipeline talks to:
//!
//! - [`RpcClient`] - Ethereum JSON-RPC over HTTP (gas price, node-managed
//!   accounts, transaction submission, receipt polling). Signing stays on
//!   the node side; this crate never sees key material.
//! - [`ExplorerClient`] - the block-explorer source-verification API.
//!
//! Both collaborators' internals are out of scope here; these clients only
//! shape requests, map transport failures, and decode the wire envelopes.

pub mod error;
pub mod explorer;
pub mod rpc;
pub mod types;

pub use error::ChainError;
pub use explorer::{ExplorerClient, ExplorerError, VerifyRequest};
pub use rpc::RpcClient;
pub use types::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, TransactionReceipt, TransactionRequest};
