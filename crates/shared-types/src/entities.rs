//! # Core Chain Entities
//!
//! Value types for talking to an EVM chain over JSON-RPC, plus the handle a
//! confirmed contract deployment produces.
//!
//! `Address`, `Hash`, and `U256` come from `primitive-types`, whose serde
//! impls already speak the `0x`-hex encoding the wire expects.

use serde::{Deserialize, Serialize};

use crate::errors::ParseError;

// Re-export the fixed-size primitives under their chain names.
pub use primitive_types::{H160 as Address, H256 as Hash, U256};

/// Parse a 20-byte address from a hex string, with or without `0x` prefix.
///
/// `H160`'s own `FromStr` rejects the prefix, so every operator-facing
/// surface (CLI flags, config values) goes through this instead.
pub fn parse_address(s: &str) -> Result<Address, ParseError> {
    let stripped = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    let bytes = hex::decode(stripped).map_err(|_| ParseError::InvalidHex(s.to_string()))?;
    if bytes.len() != 20 {
        return Err(ParseError::BadLength {
            expected: 20,
            actual: bytes.len(),
        });
    }
    Ok(Address::from_slice(&bytes))
}

/// Parse a 32-byte hash from a hex string, with or without `0x` prefix.
pub fn parse_hash(s: &str) -> Result<Hash, ParseError> {
    let stripped = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    let bytes = hex::decode(stripped).map_err(|_| ParseError::InvalidHex(s.to_string()))?;
    if bytes.len() != 32 {
        return Err(ParseError::BadLength {
            expected: 32,
            actual: bytes.len(),
        });
    }
    Ok(Hash::from_slice(&bytes))
}

/// An opaque reference to a contract that has been deployed and confirmed.
///
/// Created once per deployment, never mutated. The on-chain state it points
/// at outlives the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedContract {
    /// Contract name as it appears in the compiled artifact.
    pub name: String,
    /// The permanent on-chain address.
    pub address: Address,
    /// Hash of the deployment transaction.
    pub transaction_hash: Hash,
    /// Gas consumed by the deployment, when the receipt reported it.
    pub gas_used: Option<U256>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_address_accepts_prefixed_and_bare() {
        let prefixed = parse_address("0x00000000000000000000000000000000000000aa").unwrap();
        let bare = parse_address("00000000000000000000000000000000000000aa").unwrap();
        assert_eq!(prefixed, bare);
        assert_eq!(prefixed.as_bytes()[19], 0xaa);
    }

    #[test]
    fn parse_address_rejects_wrong_length() {
        let err = parse_address("0xabcd").unwrap_err();
        assert!(matches!(err, ParseError::BadLength { expected: 20, actual: 2 }));
    }

    #[test]
    fn parse_address_rejects_non_hex() {
        assert!(parse_address("0xzz000000000000000000000000000000000000zz").is_err());
    }

    #[test]
    fn parse_hash_roundtrip() {
        let h = parse_hash(&format!("0x{}", "11".repeat(32))).unwrap();
        assert_eq!(h.as_bytes(), &[0x11u8; 32]);
    }

    #[test]
    fn address_serializes_as_hex_string() {
        let addr = parse_address("0x00000000000000000000000000000000000000aa").unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0x00000000000000000000000000000000000000aa\"");
    }

    #[test]
    fn u256_deserializes_from_hex_quantity() {
        let v: U256 = serde_json::from_str("\"0x15\"").unwrap();
        assert_eq!(v, U256::from(21u64));
    }
}
