//! # Error Types
//!
//! The flat error taxonomy of the deploy workflow. Everything converges
//! here and propagates, unhandled, to the binary's single top-level
//! handler.

use thiserror::Error;

use chain_client::{ChainError, ExplorerError};

/// Errors that can occur anywhere in the deploy-and-verify workflow.
#[derive(Debug, Error)]
pub enum DeployError {
    /// A configuration value was absent when the operation needing it ran.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The selected network has no entry in the configuration.
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    /// The node exposes no account to sign with.
    #[error("No signing account available on network {network}")]
    MissingSigner { network: String },

    /// Chain RPC failure (connection, rejection, confirmation timeout).
    #[error(transparent)]
    Chain(#[from] ChainError),

    /// Compiled artifact could not be loaded or decoded.
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    /// The explorer refused or failed the verification request.
    #[error(transparent)]
    Verification(#[from] ExplorerError),

    /// Contract source required for verification was not readable.
    #[error("Cannot read source for {contract} at {path}: {reason}")]
    MissingSource {
        contract: String,
        path: String,
        reason: String,
    },
}

/// Errors from loading compiled contract artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Artifact for {contract} not found at {path}")]
    NotFound { contract: String, path: String },

    #[error("Artifact for {contract} is not valid JSON: {reason}")]
    Malformed { contract: String, reason: String },

    #[error("Artifact for {contract} carries no deployable bytecode")]
    EmptyBytecode { contract: String },

    #[error("Artifact bytecode for {contract} is not hex: {reason}")]
    BadBytecode { contract: String, reason: String },
}
