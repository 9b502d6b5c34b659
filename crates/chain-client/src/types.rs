//! Wire types for the Ethereum JSON-RPC surface.
//!
//! All quantity and byte fields serialize as `0x`-hex strings per the
//! JSON-RPC conventions; field names follow the camelCase the wire uses.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash, U256};

/// JSON-RPC request structure
#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<T> {
    pub jsonrpc: &'static str,
    pub method: String,
    pub params: T,
    pub id: u64,
}

impl<T> JsonRpcRequest<T> {
    pub fn new(method: impl Into<String>, params: T, id: u64) -> Self {
        Self {
            jsonrpc: "2.0",
            method: method.into(),
            params,
            id,
        }
    }
}

/// JSON-RPC response structure
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse<T> {
    pub jsonrpc: String,
    pub id: u64,
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error
#[derive(Debug, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl std::fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RPC Error {}: {}", self.code, self.message)
    }
}

/// Parameter object for `eth_sendTransaction`.
///
/// `to` is absent for contract creation; `data` carries the init code.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub from: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    pub data: String,
}

impl TransactionRequest {
    /// Build a contract-creation request from init code bytes.
    pub fn deploy(from: Address, init_code: &[u8], gas_price: Option<U256>) -> Self {
        Self {
            from,
            to: None,
            gas: None,
            gas_price,
            value: None,
            data: format!("0x{}", hex::encode(init_code)),
        }
    }
}

/// The subset of `eth_getTransactionReceipt` this tool consumes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: Hash,
    #[serde(default)]
    pub block_number: Option<U256>,
    /// Present only on contract-creation receipts.
    #[serde(default)]
    pub contract_address: Option<Address>,
    /// `0x1` success, `0x0` reverted. Pre-Byzantium nodes omit it.
    #[serde(default)]
    pub status: Option<U256>,
    #[serde(default)]
    pub gas_used: Option<U256>,
}

impl TransactionReceipt {
    /// Whether the network executed the transaction successfully.
    ///
    /// A missing status field counts as success, matching how clients treat
    /// pre-Byzantium receipts.
    pub fn succeeded(&self) -> bool {
        self.status.map(|s| !s.is_zero()).unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::parse_address;

    #[test]
    fn request_envelope_serializes_with_version_and_id() {
        let req = JsonRpcRequest::new("eth_gasPrice", Vec::<String>::new(), 7);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["jsonrpc"], "2.0");
        assert_eq!(json["method"], "eth_gasPrice");
        assert_eq!(json["id"], 7);
        assert!(json["params"].as_array().unwrap().is_empty());
    }

    #[test]
    fn deploy_request_omits_to_and_hex_encodes_data() {
        let from = parse_address("0x1000000000000000000000000000000000000001").unwrap();
        let tx = TransactionRequest::deploy(from, &[0x60, 0x80], Some(U256::from(21u64)));
        let json = serde_json::to_value(&tx).unwrap();
        assert!(json.get("to").is_none());
        assert!(json.get("gas").is_none());
        assert_eq!(json["data"], "0x6080");
        assert_eq!(json["gasPrice"], "0x15");
    }

    #[test]
    fn receipt_parses_creation_fields() {
        let raw = format!(
            r#"{{
                "transactionHash": "0x{}",
                "blockNumber": "0x10",
                "contractAddress": "0x2000000000000000000000000000000000000002",
                "status": "0x1",
                "gasUsed": "0x5208",
                "logsBloom": "0x00"
            }}"#,
            "ab".repeat(32)
        );
        let receipt: TransactionReceipt = serde_json::from_str(&raw).unwrap();
        assert!(receipt.succeeded());
        assert_eq!(receipt.gas_used, Some(U256::from(21000u64)));
        assert_eq!(
            receipt.contract_address,
            Some(parse_address("0x2000000000000000000000000000000000000002").unwrap())
        );
    }

    #[test]
    fn receipt_with_zero_status_failed() {
        let raw = format!(
            r#"{{"transactionHash": "0x{}", "status": "0x0"}}"#,
            "cd".repeat(32)
        );
        let receipt: TransactionReceipt = serde_json::from_str(&raw).unwrap();
        assert!(!receipt.succeeded());
        assert!(receipt.contract_address.is_none());
    }

    #[test]
    fn response_with_null_result_parses() {
        let raw = r#"{"jsonrpc": "2.0", "id": 1, "result": null}"#;
        let resp: JsonRpcResponse<TransactionReceipt> = serde_json::from_str(raw).unwrap();
        assert!(resp.result.is_none());
        assert!(resp.error.is_none());
    }
}
