//! Compiled contract artifacts.
//!
//! The compiler is an external collaborator; its Hardhat-format artifact
//! JSON (`contractName`, `abi`, `bytecode`) is consumed as-is. The only
//! ABI knowledge living here is the 32-byte left-padded address word the
//! marketplace constructor takes.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use shared_types::Address;

use crate::errors::ArtifactError;

/// A compiled contract, ready to turn into deployment init code.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub contract_name: String,
    /// Kept opaque; nothing here interprets ABI entries.
    pub abi: serde_json::Value,
    /// `0x`-prefixed creation bytecode.
    pub bytecode: String,
}

impl ContractArtifact {
    /// Decode the creation bytecode.
    pub fn bytecode_bytes(&self) -> Result<Vec<u8>, ArtifactError> {
        let stripped = self
            .bytecode
            .strip_prefix("0x")
            .unwrap_or(&self.bytecode);
        if stripped.is_empty() {
            return Err(ArtifactError::EmptyBytecode {
                contract: self.contract_name.clone(),
            });
        }
        hex::decode(stripped).map_err(|e| ArtifactError::BadBytecode {
            contract: self.contract_name.clone(),
            reason: e.to_string(),
        })
    }

    /// Build init code: creation bytecode followed by the ABI-encoded
    /// constructor arguments.
    pub fn init_code(&self, constructor_args: &[Address]) -> Result<Vec<u8>, ArtifactError> {
        let mut code = self.bytecode_bytes()?;
        for arg in constructor_args {
            code.extend_from_slice(&encode_address_word(*arg));
        }
        Ok(code)
    }
}

/// ABI-encode an address as a 32-byte left-padded word.
fn encode_address_word(address: Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_bytes());
    word
}

/// Parse a single artifact from JSON text.
pub fn parse_artifact(contract: &str, json: &str) -> Result<ContractArtifact, ArtifactError> {
    serde_json::from_str(json).map_err(|e| ArtifactError::Malformed {
        contract: contract.to_string(),
        reason: e.to_string(),
    })
}

/// Filesystem store of compiled artifacts, one `<Name>.json` per contract.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load the artifact for a named contract.
    pub fn load(&self, contract: &str) -> Result<ContractArtifact, ArtifactError> {
        let path = self.dir.join(format!("{contract}.json"));
        let text = std::fs::read_to_string(&path).map_err(|_| ArtifactError::NotFound {
            contract: contract.to_string(),
            path: path.display().to_string(),
        })?;
        parse_artifact(contract, &text)
    }
}
