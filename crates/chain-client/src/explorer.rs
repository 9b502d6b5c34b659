//! Block-explorer source-verification client.
//!
//! Speaks the etherscan-style `module=contract&action=verifysourcecode`
//! form API. One submission per call; polling the verification outcome is
//! the operator's business, so the returned value is the explorer's
//! submission GUID.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use shared_types::Address;

/// Errors from the explorer verification API.
#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The explorer refused the submission (bad key, bytecode mismatch,
    /// already verified, ...).
    #[error("Verification rejected: {message}: {detail}")]
    Rejected { message: String, detail: String },
}

/// A source-verification submission.
#[derive(Debug, Clone)]
pub struct VerifyRequest {
    pub contract_address: Address,
    /// Contract name as the compiler knows it.
    pub contract_name: String,
    /// Flattened source text.
    pub source_code: String,
    /// Compiler version string, e.g. `v0.8.18`.
    pub compiler_version: String,
    pub optimization_used: bool,
    pub optimizer_runs: u32,
}

/// Response envelope shared by all etherscan-style endpoints.
#[derive(Debug, Deserialize)]
struct ExplorerResponse {
    status: String,
    message: String,
    result: String,
}

/// Explorer verification API client.
pub struct ExplorerClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl ExplorerClient {
    /// Create a client against an explorer API base URL.
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, ExplorerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(ExplorerError::Http)?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Submit a source-verification request.
    ///
    /// Returns the explorer's submission GUID on acceptance.
    pub async fn verify_source(&self, req: &VerifyRequest) -> Result<String, ExplorerError> {
        let address = format!("{:#x}", req.contract_address);
        let optimization = if req.optimization_used { "1" } else { "0" };
        let runs = req.optimizer_runs.to_string();

        let form: Vec<(&str, &str)> = vec![
            ("apikey", self.api_key.as_str()),
            ("module", "contract"),
            ("action", "verifysourcecode"),
            ("contractaddress", address.as_str()),
            ("sourceCode", req.source_code.as_str()),
            ("codeformat", "solidity-single-file"),
            ("contractname", req.contract_name.as_str()),
            ("compilerversion", req.compiler_version.as_str()),
            ("optimizationUsed", optimization),
            ("runs", runs.as_str()),
        ];

        let response = self
            .client
            .post(&self.api_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ExplorerError::Connection(format!("Cannot connect to {}", self.api_url))
                } else {
                    ExplorerError::Http(e)
                }
            })?;

        let envelope: ExplorerResponse = response
            .json()
            .await
            .map_err(|e| ExplorerError::Parse(e.to_string()))?;

        debug!(contract = %req.contract_name, status = %envelope.status, "Verification submitted");
        into_submission_guid(envelope)
    }
}

/// Map the explorer envelope to a submission GUID or a rejection.
fn into_submission_guid(envelope: ExplorerResponse) -> Result<String, ExplorerError> {
    if envelope.status == "1" {
        Ok(envelope.result)
    } else {
        Err(ExplorerError::Rejected {
            message: envelope.message,
            detail: envelope.result,
        })
    }
}
