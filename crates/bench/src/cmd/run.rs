use super::{RunOpts, deployer, load_config};
use crate::{
    chain,
    opts::GlobalArgs,
    runner::{BenchmarkRun, RunSettings},
};
use alloy_primitives::Address;
use clap::Parser;
use eyre::Result;

/// CLI arguments for `oracle-bench run`.
#[derive(Clone, Debug, Parser)]
pub struct RunArgs {
    /// Network the oracle is deployed on.
    #[arg(long, short, value_name = "NAME")]
    pub network: String,

    /// Address of the deployed oracle.
    #[arg(long, value_name = "ADDRESS")]
    pub contract: Address,

    #[command(flatten)]
    pub run: RunOpts,
}

impl RunArgs {
    pub async fn run(self, global: &GlobalArgs) -> Result<()> {
        let config = load_config(global, self.run)?;
        let settings = RunSettings::from_config(&config)?;
        let network = config.network(&self.network)?;
        let chain = chain::connect(&network);

        let report = BenchmarkRun::new(chain.as_ref(), &network, deployer(&network)?, settings)
            .with_summaries(!global.json)
            .run_existing(self.contract)
            .await?;

        if global.json {
            sh_println!("{}", serde_json::to_string_pretty(&report)?)?;
        } else {
            sh_println!("\n{}", report.phase_table())?;
        }
        Ok(())
    }
}
