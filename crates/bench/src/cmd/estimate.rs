use super::{RunOpts, load_config};
use crate::{
    chain::{self, OracleChain},
    opts::GlobalArgs,
};
use alloy_primitives::U256;
use clap::Parser;
use eyre::Result;
use oracle_bench_common::{CostEstimate, CostEstimates};

/// CLI arguments for `oracle-bench estimate`.
#[derive(Clone, Debug, Parser)]
pub struct EstimateArgs {
    /// Networks to estimate. Defaults to every network with a gas estimate.
    #[arg(long = "network", short, value_name = "NAME")]
    pub networks: Vec<String>,
}

impl EstimateArgs {
    pub async fn run(self, global: &GlobalArgs) -> Result<()> {
        let config = load_config(global, RunOpts::default())?;
        let names = if self.networks.is_empty() {
            config
                .networks()
                .into_iter()
                .filter(|(_, network)| network.estimated_gas_used.is_some())
                .map(|(name, _)| name)
                .collect()
        } else {
            self.networks
        };

        let mut estimates = Vec::with_capacity(names.len());
        for name in &names {
            let network = config.network(name)?;
            let Some(gas_used) = network.estimated_gas_used else {
                eyre::bail!("network `{name}` has no `estimated_gas_used` configured");
            };
            let chain = chain::connect(&network);
            estimates.push(estimate_cost(chain.as_ref(), gas_used).await);
        }
        let estimates = estimates.into_iter().collect::<CostEstimates>();

        if global.json {
            sh_println!("{}", serde_json::to_string_pretty(&estimates)?)?;
        } else {
            sh_println!("{estimates}")?;
        }
        Ok(())
    }
}

/// Prices `gas_used` at the current gas price of `chain`.
///
/// A failed price lookup yields an estimate carrying the error.
pub async fn estimate_cost(chain: &dyn OracleChain, gas_used: u64) -> CostEstimate {
    match chain.gas_price().await {
        Ok(price) => CostEstimate::new(chain.name(), gas_used, U256::from(price)),
        Err(err) => {
            warn!(network = chain.name(), %err, "failed to fetch gas price");
            CostEstimate::failed(chain.name(), gas_used, err)
        }
    }
}
