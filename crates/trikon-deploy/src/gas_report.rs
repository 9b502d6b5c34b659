//! Optional per-contract gas usage report.
//!
//! Fed from deployment receipts after a successful run. Costs are shown in
//! native units; the configured currency is a display label, since price
//! conversion would need an oracle this tool does not talk to.

use shared_types::{DeployedContract, U256};

use crate::config::GasReporterConfig;

/// One reported deployment.
#[derive(Debug, Clone)]
struct GasEntry {
    contract: String,
    gas_used: U256,
    fee_wei: U256,
}

/// Accumulates gas usage across a run and renders a small table.
#[derive(Debug)]
pub struct GasReport {
    config: GasReporterConfig,
    gas_price: U256,
    entries: Vec<GasEntry>,
}

impl GasReport {
    pub fn new(config: GasReporterConfig, gas_price: U256) -> Self {
        Self {
            config,
            gas_price,
            entries: Vec::new(),
        }
    }

    /// Record a confirmed deployment. Excluded contracts and receipts
    /// without a gas figure are dropped silently.
    pub fn record(&mut self, contract: &DeployedContract) {
        if self.config.exclude_contracts.iter().any(|c| c == &contract.name) {
            return;
        }
        let Some(gas_used) = contract.gas_used else {
            return;
        };
        self.entries.push(GasEntry {
            contract: contract.name.clone(),
            gas_used,
            fee_wei: gas_used.saturating_mul(self.gas_price),
        });
    }

    /// Render the report, or `None` when reporting is disabled or empty.
    pub fn render(&self) -> Option<String> {
        if !self.config.enabled || self.entries.is_empty() {
            return None;
        }

        let mut out = String::new();
        out.push_str(&format!(
            "Gas usage report (currency: {}, gas price: {} wei)\n",
            self.config.currency, self.gas_price
        ));
        out.push_str(&format!("{:<16} {:>12} {:>24}\n", "Contract", "Gas", "Fee (wei)"));
        for entry in &self.entries {
            out.push_str(&format!(
                "{:<16} {:>12} {:>24}\n",
                entry.contract, entry.gas_used, entry.fee_wei
            ));
        }
        Some(out)
    }
}
