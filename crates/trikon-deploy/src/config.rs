//! Deployment configuration from environment variables and literals.
//!
//! Assembled exactly once at process start and passed by parameter from
//! then on; nothing reads the ambient environment after this. No values
//! are validated here: a missing credential or URL surfaces only when the
//! operation that depends on it runs.

use std::collections::BTreeMap;
use std::env;

/// Compiler version the contracts were built with.
pub const SOLC_VERSION: &str = "0.8.18";

/// Optimizer run count the contracts were built with.
pub const OPTIMIZER_RUNS: u32 = 200;

/// Solidity compiler settings (informational for deployment, required for
/// verification metadata).
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    pub version: String,
    pub optimizer: OptimizerConfig,
}

#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    pub enabled: bool,
    pub runs: u32,
}

impl CompilerConfig {
    /// Version string in the form the explorer API expects, e.g. `v0.8.18`.
    pub fn version_tag(&self) -> String {
        format!("v{}", self.version)
    }
}

/// One named network entry.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// RPC endpoint URL. Absent until the environment provides it.
    pub url: Option<String>,
    /// Signing account credentials, handed to the provider as-is. This tool
    /// never interprets key material; the node signs.
    pub accounts: Vec<String>,
    /// Explorer API base URL for this network.
    pub explorer_api_url: String,
}

/// Explorer (etherscan-style) settings.
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    pub api_key: Option<String>,
}

/// Gas reporting settings.
#[derive(Debug, Clone)]
pub struct GasReporterConfig {
    pub enabled: bool,
    /// Display currency label. Conversion needs a price oracle, which is
    /// not this tool's business; the label is shown as-is.
    pub currency: String,
    pub exclude_contracts: Vec<String>,
    /// Contract source directory, also used to locate sources for
    /// verification.
    pub src: String,
}

/// The complete, immutable deployment configuration.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub compiler: CompilerConfig,
    pub networks: BTreeMap<String, NetworkConfig>,
    pub explorer: ExplorerConfig,
    pub gas_reporter: GasReporterConfig,
}

impl Default for DeployConfig {
    fn default() -> Self {
        let mut networks = BTreeMap::new();

        // Legacy entry with a hard-coded endpoint, likely a leftover
        // duplicate of the env-sourced testnet entry. Kept as data,
        // selected only on explicit request.
        networks.insert(
            "polygonMainnet".to_string(),
            NetworkConfig {
                url: Some(
                    "https://polygon-mumbai.g.alchemy.com/v2/_ULp5HCwK_YWhB3OfsvTU64A8G9A0KsY"
                        .to_string(),
                ),
                accounts: Vec::new(),
                explorer_api_url: "https://api.polygonscan.com/api".to_string(),
            },
        );

        networks.insert(
            "polygonTestnet".to_string(),
            NetworkConfig {
                url: None,
                accounts: Vec::new(),
                explorer_api_url: "https://api-testnet.polygonscan.com/api".to_string(),
            },
        );

        Self {
            compiler: CompilerConfig {
                version: SOLC_VERSION.to_string(),
                optimizer: OptimizerConfig {
                    enabled: true,
                    runs: OPTIMIZER_RUNS,
                },
            },
            networks,
            explorer: ExplorerConfig { api_key: None },
            gas_reporter: GasReporterConfig {
                enabled: false,
                currency: "USD".to_string(),
                exclude_contracts: Vec::new(),
                src: "./contracts".to_string(),
            },
        }
    }
}

impl DeployConfig {
    /// Assemble configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `PRIVATE_KEY`: signing account credential for both networks
    /// - `POLYGON_RPC_URL`: RPC endpoint for `polygonTestnet`
    /// - `POLYGON_API_KEY`: explorer API key for verification
    /// - `REPORT_GAS`: any value enables the gas report
    pub fn from_env() -> Self {
        let mut config = Self::default();

        let accounts: Vec<String> = env::var("PRIVATE_KEY").into_iter().collect();
        for network in config.networks.values_mut() {
            network.accounts = accounts.clone();
        }

        if let Ok(url) = env::var("POLYGON_RPC_URL") {
            if let Some(testnet) = config.networks.get_mut("polygonTestnet") {
                testnet.url = Some(url);
            }
        }

        config.explorer.api_key = env::var("POLYGON_API_KEY").ok();
        config.gas_reporter.enabled = env::var("REPORT_GAS").is_ok();

        config
    }

    /// Look up a named network entry.
    pub fn network(&self, name: &str) -> Option<&NetworkConfig> {
        self.networks.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_compiler_settings() {
        let config = DeployConfig::default();
        assert_eq!(config.compiler.version, "0.8.18");
        assert_eq!(config.compiler.version_tag(), "v0.8.18");
        assert!(config.compiler.optimizer.enabled);
        assert_eq!(config.compiler.optimizer.runs, 200);
    }

    #[test]
    fn default_carries_both_network_entries() {
        let config = DeployConfig::default();
        let mainnet = config.network("polygonMainnet").unwrap();
        assert!(mainnet.url.as_deref().unwrap().contains("polygon-mumbai"));

        let testnet = config.network("polygonTestnet").unwrap();
        assert!(testnet.url.is_none());
        assert!(testnet.explorer_api_url.contains("api-testnet"));
    }

    #[test]
    fn unknown_network_is_none() {
        let config = DeployConfig::default();
        assert!(config.network("sepolia").is_none());
    }

    #[test]
    fn gas_reporter_defaults_off_with_usd_label() {
        let config = DeployConfig::default();
        assert!(!config.gas_reporter.enabled);
        assert_eq!(config.gas_reporter.currency, "USD");
        assert!(config.gas_reporter.exclude_contracts.is_empty());
        assert_eq!(config.gas_reporter.src, "./contracts");
    }
}
