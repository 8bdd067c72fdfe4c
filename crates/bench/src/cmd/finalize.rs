use super::{RunOpts, deployer, load_config};
use crate::{chain, measure::Meter, opts::GlobalArgs, phases};
use alloy_primitives::Address;
use clap::Parser;
use eyre::{Result, WrapErr};
use oracle_bench_common::{GasTracker, Phase};
use serde_json::json;

/// CLI arguments for `oracle-bench finalize`.
#[derive(Clone, Debug, Parser)]
pub struct FinalizeArgs {
    /// Network the oracle is deployed on.
    #[arg(long, short, value_name = "NAME")]
    pub network: String,

    /// Address of the deployed oracle.
    #[arg(long, value_name = "ADDRESS")]
    pub contract: Address,
}

impl FinalizeArgs {
    pub async fn run(self, global: &GlobalArgs) -> Result<()> {
        let config = load_config(global, RunOpts::default())?;
        let network = config.network(&self.network)?;
        let owner = deployer(&network)?;
        let chain = chain::connect(&network);

        let tracker = GasTracker::new();
        let meter = Meter::new(chain.as_ref(), &tracker, network.fallback_gas_price);
        let price = phases::finalize(&meter, self.contract, &owner)
            .await
            .wrap_err_with(|| format!("{}: failed to finalize", network.name))?;

        let record = tracker.record(Phase::Finalize);
        if global.json {
            let output = json!({
                "network": network.name,
                "contract": self.contract,
                "price": price,
                "finalize": record,
            });
            sh_println!("{}", serde_json::to_string_pretty(&output)?)?;
        } else {
            sh_println!("Price finalized on {}: {price}", network.name)?;
            sh_println!("{}", phases::summary(&tracker, Phase::Finalize))?;
        }
        Ok(())
    }
}
