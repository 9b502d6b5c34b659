//! # Deployment Pipeline
//!
//! The strictly sequential deploy-and-verify workflow: gas price, token,
//! marketplace (constructed over the token's address), a fixed pause for
//! the explorer's indexer, then one verification request.
//!
//! Each step returns a `Result` and the sequence short-circuits on the
//! first failure. No step is retried, no step is skipped on partial
//! failure, and nothing is rolled back; contracts deployed before a later
//! failure stay on-chain.

use std::time::Duration;

use tracing::{info, warn};

use shared_types::{Address, DeployedContract, U256};

use crate::artifacts::ArtifactStore;
use crate::errors::DeployError;
use crate::ports::{ChainProvider, SourceVerifier};

/// Artifact name of the ERC20 token contract.
pub const TOKEN_CONTRACT: &str = "TrikonToken";

/// Name the token is reported under on the console.
pub const TOKEN_DISPLAY_NAME: &str = "TestERC20";

/// Artifact name of the NFT marketplace contract.
pub const MARKETPLACE_CONTRACT: &str = "BuyNFT";

/// Name the marketplace is reported under on the console.
pub const MARKETPLACE_DISPLAY_NAME: &str = "Marketplace";

/// Fixed pause between deployment confirmation and verification, giving
/// the explorer's index time to catch up with the new contract. A single
/// static delay, not a retry mechanism.
pub const EXPLORER_INDEX_DELAY: Duration = Duration::from_secs(1);

/// An explicit verification target.
///
/// The workflow never infers one: which contract to verify is operator
/// input, and without it the verification step is skipped with a warning.
#[derive(Debug, Clone)]
pub struct VerifyTarget {
    pub address: Address,
    pub contract_name: String,
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub network: String,
    pub gas_price: U256,
    pub token: DeployedContract,
    pub marketplace: DeployedContract,
    /// Explorer submission GUID, when verification ran.
    pub verification: Option<String>,
}

/// The deploy-and-verify workflow over abstract chain and explorer ports.
pub struct DeploymentPipeline<'a, C, V> {
    chain: &'a C,
    verifier: &'a V,
    network: String,
    verify_target: Option<VerifyTarget>,
    index_delay: Duration,
}

impl<'a, C, V> DeploymentPipeline<'a, C, V>
where
    C: ChainProvider,
    V: SourceVerifier,
{
    pub fn new(
        chain: &'a C,
        verifier: &'a V,
        network: impl Into<String>,
        verify_target: Option<VerifyTarget>,
    ) -> Self {
        Self {
            chain,
            verifier,
            network: network.into(),
            verify_target,
            index_delay: EXPLORER_INDEX_DELAY,
        }
    }

    /// Override the explorer-index pause (tests use zero).
    pub fn with_index_delay(mut self, delay: Duration) -> Self {
        self.index_delay = delay;
        self
    }

    /// Execute the workflow end to end.
    pub async fn run(&self, artifacts: &ArtifactStore) -> Result<PipelineReport, DeployError> {
        // Step 1: one network read, no local state.
        let gas_price = self.chain.gas_price().await?;
        info!(gas_price = %gas_price, network = %self.network, "Fetched network gas price");

        // Step 2: the token deploys with no constructor arguments.
        let token_artifact = artifacts.load(TOKEN_CONTRACT)?;
        let token = self
            .chain
            .deploy(TOKEN_CONTRACT, token_artifact.init_code(&[])?, gas_price)
            .await?;
        println!("{}", deployed_line(TOKEN_DISPLAY_NAME, token.address, &self.network));

        // Step 3: the marketplace is constructed over the token's address
        // from this same run.
        let marketplace_artifact = artifacts.load(MARKETPLACE_CONTRACT)?;
        let marketplace = self
            .chain
            .deploy(
                MARKETPLACE_CONTRACT,
                marketplace_artifact.init_code(&[token.address])?,
                gas_price,
            )
            .await?;
        println!(
            "{}",
            deployed_line(MARKETPLACE_DISPLAY_NAME, marketplace.address, &self.network)
        );

        // Steps 4-5: pause for the explorer's indexer, then submit one
        // verification request for the explicitly configured target.
        let verification = match &self.verify_target {
            Some(target) => {
                tokio::time::sleep(self.index_delay).await;
                let guid = self
                    .verifier
                    .verify(target.address, &target.contract_name)
                    .await?;
                info!(
                    contract = %target.contract_name,
                    address = ?target.address,
                    guid = %guid,
                    "Verification submitted"
                );
                Some(guid)
            }
            None => {
                warn!("No verification target supplied; skipping source verification");
                None
            }
        };

        Ok(PipelineReport {
            network: self.network.clone(),
            gas_price,
            token,
            marketplace,
            verification,
        })
    }
}

/// The exact console line a confirmed deployment is reported with.
fn deployed_line(display_name: &str, address: Address, network: &str) -> String {
    format!("{display_name} deployed at {address:#x} in network: {network}.")
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chain_client::ChainError;
    use shared_types::{parse_address, Hash};

    use crate::artifacts::ArtifactStore;

    fn test_artifacts() -> ArtifactStore {
        let dir = std::env::temp_dir().join(format!(
            "trikon-artifacts-{}-{:?}",
            std::process::id(),
            std::thread::current().id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("TrikonToken.json"),
            r#"{"contractName": "TrikonToken", "abi": [], "bytecode": "0x6001600101"}"#,
        )
        .unwrap();
        std::fs::write(
            dir.join("BuyNFT.json"),
            r#"{"contractName": "BuyNFT", "abi": [], "bytecode": "0x6002600202"}"#,
        )
        .unwrap();
        ArtifactStore::new(dir)
    }

    /// Chain mock handing out sequential addresses and recording calls.
    struct MockChain {
        calls: Mutex<Vec<String>>,
        init_codes: Mutex<Vec<Vec<u8>>>,
        next_address: AtomicU64,
        fail_deploy_of: Option<&'static str>,
    }

    impl MockChain {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                init_codes: Mutex::new(Vec::new()),
                next_address: AtomicU64::new(1),
                fail_deploy_of: None,
            }
        }

        fn failing_on(contract: &'static str) -> Self {
            Self {
                fail_deploy_of: Some(contract),
                ..Self::new()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChainProvider for MockChain {
        async fn gas_price(&self) -> Result<U256, DeployError> {
            self.calls.lock().unwrap().push("gas_price".to_string());
            Ok(U256::from(21u64))
        }

        async fn deploy(
            &self,
            name: &str,
            init_code: Vec<u8>,
            gas_price: U256,
        ) -> Result<DeployedContract, DeployError> {
            assert_eq!(gas_price, U256::from(21u64));
            self.calls.lock().unwrap().push(format!("deploy:{name}"));

            if self.fail_deploy_of == Some(name) {
                return Err(ChainError::Connection(format!("{name} deploy refused")).into());
            }

            self.init_codes.lock().unwrap().push(init_code);

            let n = self.next_address.fetch_add(1, Ordering::Relaxed);
            let mut bytes = [0u8; 20];
            bytes[12..].copy_from_slice(&n.to_be_bytes());
            Ok(DeployedContract {
                name: name.to_string(),
                address: Address::from(bytes),
                transaction_hash: Hash::repeat_byte(n as u8),
                gas_used: Some(U256::from(1_000_000u64 + n)),
            })
        }
    }

    /// Verifier mock recording submissions.
    struct MockVerifier {
        calls: Mutex<Vec<(Address, String)>>,
    }

    impl MockVerifier {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SourceVerifier for MockVerifier {
        async fn verify(
            &self,
            address: Address,
            contract_name: &str,
        ) -> Result<String, DeployError> {
            self.calls
                .lock()
                .unwrap()
                .push((address, contract_name.to_string()));
            Ok("guid-1".to_string())
        }
    }

    #[tokio::test]
    async fn steps_run_in_order_and_marketplace_takes_token_address() {
        let chain = MockChain::new();
        let verifier = MockVerifier::new();
        let artifacts = test_artifacts();

        let target_addr = parse_address("0x00000000000000000000000000000000000000ff").unwrap();
        let pipeline = DeploymentPipeline::new(
            &chain,
            &verifier,
            "polygonTestnet",
            Some(VerifyTarget {
                address: target_addr,
                contract_name: "BuyNFT".to_string(),
            }),
        )
        .with_index_delay(Duration::ZERO);

        let report = pipeline.run(&artifacts).await.unwrap();

        assert_eq!(
            chain.calls(),
            vec!["gas_price", "deploy:TrikonToken", "deploy:BuyNFT"]
        );

        // The marketplace init code ends with the token's address, padded
        // to a 32-byte word.
        let codes = chain.init_codes.lock().unwrap();
        let marketplace_code = &codes[1];
        let word = &marketplace_code[marketplace_code.len() - 32..];
        assert_eq!(&word[..12], &[0u8; 12]);
        assert_eq!(&word[12..], report.token.address.as_bytes());

        // Verification went to the explicit target, nothing inferred.
        let verifies = verifier.calls.lock().unwrap();
        assert_eq!(verifies.len(), 1);
        assert_eq!(verifies[0].0, target_addr);
        assert_eq!(verifies[0].1, "BuyNFT");
        assert_eq!(report.verification.as_deref(), Some("guid-1"));

        assert_ne!(report.token.address, report.marketplace.address);
    }

    #[tokio::test]
    async fn token_failure_stops_everything_downstream() {
        let chain = MockChain::failing_on("TrikonToken");
        let verifier = MockVerifier::new();
        let artifacts = test_artifacts();

        let pipeline = DeploymentPipeline::new(
            &chain,
            &verifier,
            "polygonTestnet",
            Some(VerifyTarget {
                address: Address::zero(),
                contract_name: "BuyNFT".to_string(),
            }),
        )
        .with_index_delay(Duration::ZERO);

        let err = pipeline.run(&artifacts).await.unwrap_err();
        assert!(matches!(err, DeployError::Chain(_)));

        assert_eq!(chain.calls(), vec!["gas_price", "deploy:TrikonToken"]);
        assert!(verifier.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn marketplace_failure_skips_verification() {
        let chain = MockChain::failing_on("BuyNFT");
        let verifier = MockVerifier::new();
        let artifacts = test_artifacts();

        let pipeline = DeploymentPipeline::new(
            &chain,
            &verifier,
            "polygonTestnet",
            Some(VerifyTarget {
                address: Address::zero(),
                contract_name: "BuyNFT".to_string(),
            }),
        )
        .with_index_delay(Duration::ZERO);

        assert!(pipeline.run(&artifacts).await.is_err());
        assert!(verifier.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_verify_target_skips_verification_without_guessing() {
        let chain = MockChain::new();
        let verifier = MockVerifier::new();
        let artifacts = test_artifacts();

        let pipeline = DeploymentPipeline::new(&chain, &verifier, "polygonTestnet", None)
            .with_index_delay(Duration::ZERO);

        let report = pipeline.run(&artifacts).await.unwrap();
        assert!(report.verification.is_none());
        assert!(verifier.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn reruns_deploy_fresh_instances() {
        let chain = MockChain::new();
        let verifier = MockVerifier::new();
        let artifacts = test_artifacts();

        let pipeline = DeploymentPipeline::new(&chain, &verifier, "polygonTestnet", None)
            .with_index_delay(Duration::ZERO);

        let first = pipeline.run(&artifacts).await.unwrap();
        let second = pipeline.run(&artifacts).await.unwrap();

        assert_ne!(first.token.address, second.token.address);
        assert_ne!(first.marketplace.address, second.marketplace.address);
    }

    #[test]
    fn console_lines_match_the_reporting_format() {
        let a = parse_address("0x1000000000000000000000000000000000000001").unwrap();
        assert_eq!(
            deployed_line(TOKEN_DISPLAY_NAME, a, "polygonTestnet"),
            "TestERC20 deployed at 0x1000000000000000000000000000000000000001 in network: polygonTestnet."
        );
        assert_eq!(
            deployed_line(MARKETPLACE_DISPLAY_NAME, a, "polygonTestnet"),
            "Marketplace deployed at 0x1000000000000000000000000000000000000001 in network: polygonTestnet."
        );
    }
}
