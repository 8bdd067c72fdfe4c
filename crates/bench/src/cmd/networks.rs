use super::{RunOpts, load_config};
use crate::opts::GlobalArgs;
use clap::Parser;
use eyre::Result;

/// CLI arguments for `oracle-bench networks`.
#[derive(Clone, Debug, Parser)]
pub struct NetworksArgs {
    /// Only list networks whose deployer key is set.
    #[arg(long)]
    pub with_keys: bool,
}

impl NetworksArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let config = load_config(global, RunOpts::default())?;
        let networks = config
            .networks()
            .into_iter()
            .filter(|(_, network)| !self.with_keys || network.has_key())
            .collect::<std::collections::BTreeMap<_, _>>();

        if global.json {
            sh_println!("{}", serde_json::to_string_pretty(&networks)?)?;
            return Ok(());
        }

        for (name, network) in &networks {
            let key = if network.has_key() { "set" } else { "missing" };
            sh_println!(
                "{name:<22} {:>9}  {:<7} {:<20} key {key:<8} {}",
                network.chain_id,
                network.kind.to_string(),
                network.key_env,
                network.rpc_url
            )?;
        }
        Ok(())
    }
}
