//! # Trikon Deploy
//!
//! Deploys the Trikon token and the BuyNFT marketplace to a Polygon test
//! network, then requests contract-source verification from the explorer.
//!
//! ## Architecture
//!
//! - `config` - immutable configuration assembled once from environment
//!   variables and literals, passed by parameter from then on
//! - `artifacts` - compiled contract artifacts (the compiler is an external
//!   collaborator; its JSON output is our input)
//! - `ports` - outbound interfaces to the chain and the explorer
//! - `adapters` - port implementations over the `chain-client` crate
//! - `pipeline` - the strictly sequential deploy-and-verify workflow
//! - `gas_report` - optional per-contract gas usage report
//!
//! Control flow is a single async task: every network operation suspends
//! the workflow until its remote result arrives. There is no retry, no
//! rollback, and no idempotent re-run protection; running twice deploys
//! fresh contract instances.

pub mod adapters;
pub mod artifacts;
pub mod config;
pub mod errors;
pub mod gas_report;
pub mod pipeline;
pub mod ports;

pub use config::DeployConfig;
pub use errors::DeployError;
pub use pipeline::{DeploymentPipeline, PipelineReport, VerifyTarget};
