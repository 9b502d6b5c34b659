//! Trikon Deploy: deploy the token and marketplace, then request source
//! verification from the explorer.
//!
//! The binary owns the single top-level failure handler: any error from
//! the workflow is logged and turns into a non-zero exit status. There is
//! no partial-failure recovery; contracts that confirmed before a later
//! failure stay on-chain.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use chain_client::{ExplorerClient, RpcClient};
use shared_types::{parse_address, Address};
use trikon_deploy::adapters::{EtherscanVerifier, RpcChainProvider};
use trikon_deploy::artifacts::ArtifactStore;
use trikon_deploy::config::NetworkConfig;
use trikon_deploy::gas_report::GasReport;
use trikon_deploy::{DeployConfig, DeployError, DeploymentPipeline, VerifyTarget};

/// Trikon deployment tool
#[derive(Parser, Debug)]
#[command(name = "trikon-deploy")]
#[command(about = "Deploys the Trikon token and BuyNFT marketplace, then requests source verification")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the deploy-and-verify workflow
    Deploy(DeployArgs),
    /// Print the node-managed signing accounts for a network
    Accounts(AccountsArgs),
}

#[derive(Args, Debug)]
struct DeployArgs {
    /// Named network entry to deploy to
    #[arg(short, long, default_value = "polygonTestnet")]
    network: String,

    /// Directory holding compiled contract artifacts
    #[arg(long, default_value = "./artifacts")]
    artifacts: PathBuf,

    /// Contract address to submit for source verification. Without it the
    /// verification step is skipped.
    #[arg(long, value_parser = parse_address_arg, requires = "verify_contract")]
    verify: Option<Address>,

    /// Contract name for the verification submission
    #[arg(long, requires = "verify")]
    verify_contract: Option<String>,
}

#[derive(Args, Debug)]
struct AccountsArgs {
    /// Named network entry to query
    #[arg(short, long, default_value = "polygonTestnet")]
    network: String,
}

fn parse_address_arg(s: &str) -> Result<Address, String> {
    parse_address(s).map_err(|e| e.to_string())
}

/// Resolve a network entry and its RPC endpoint.
fn network_endpoint<'a>(
    config: &'a DeployConfig,
    name: &str,
) -> Result<(&'a NetworkConfig, String), DeployError> {
    let network = config
        .network(name)
        .ok_or_else(|| DeployError::UnknownNetwork(name.to_string()))?;
    let url = network.url.clone().ok_or_else(|| {
        DeployError::Config(format!("No RPC URL configured for network {name} (POLYGON_RPC_URL)"))
    })?;
    Ok((network, url))
}

async fn run_deploy(config: &DeployConfig, args: &DeployArgs) -> Result<(), DeployError> {
    let (network, url) = network_endpoint(config, &args.network)?;

    let rpc = RpcClient::new(url)?;
    let chain = RpcChainProvider::new(rpc, args.network.as_str());

    // A missing API key is carried as an empty credential; the explorer
    // rejects it if verification is actually attempted.
    let api_key = config.explorer.api_key.clone().unwrap_or_default();
    let explorer = ExplorerClient::new(network.explorer_api_url.clone(), api_key)?;
    let verifier = EtherscanVerifier::new(explorer, config.compiler.clone(), &config.gas_reporter.src);

    let verify_target = match (&args.verify, &args.verify_contract) {
        (Some(address), Some(contract_name)) => Some(VerifyTarget {
            address: *address,
            contract_name: contract_name.clone(),
        }),
        _ => None,
    };

    let pipeline = DeploymentPipeline::new(&chain, &verifier, args.network.as_str(), verify_target);
    let artifacts = ArtifactStore::new(&args.artifacts);
    let report = pipeline.run(&artifacts).await?;

    if config.gas_reporter.enabled {
        let mut gas = GasReport::new(config.gas_reporter.clone(), report.gas_price);
        gas.record(&report.token);
        gas.record(&report.marketplace);
        if let Some(table) = gas.render() {
            print!("{table}");
        }
    }

    Ok(())
}

async fn run_accounts(config: &DeployConfig, args: &AccountsArgs) -> Result<(), DeployError> {
    let (_network, url) = network_endpoint(config, &args.network)?;
    let rpc = RpcClient::new(url)?;

    let accounts = rpc.accounts().await?;
    for account in accounts {
        println!("{account:#x}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env first so the configuration sees it; a missing file is fine.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = DeployConfig::from_env();

    let result = match &cli.command {
        Command::Deploy(args) => run_deploy(&config, args).await,
        Command::Accounts(args) => run_accounts(&config, args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Workflow failed");
            ExitCode::FAILURE
        }
    }
}
