use super::{RunOpts, deployer, load_config};
use crate::{
    artifacts::ArtifactRegistry,
    chain,
    opts::GlobalArgs,
    runner::{BenchmarkRun, RunSettings},
};
use clap::Parser;
use eyre::{Result, WrapErr};
use oracle_bench_common::{GasCostsMatrix, MatrixParameters, NetworkReport};
use serde::Serialize;

/// CLI arguments for `oracle-bench benchmark`.
#[derive(Clone, Debug, Parser)]
pub struct BenchmarkArgs {
    /// Networks to benchmark. Defaults to every network whose deployer key is set.
    #[arg(long = "network", short, value_name = "NAME")]
    pub networks: Vec<String>,

    #[command(flatten)]
    pub run: RunOpts,
}

#[derive(Serialize)]
struct BenchmarkOutput<'a> {
    networks: &'a [NetworkReport],
    matrix: &'a GasCostsMatrix,
}

impl BenchmarkArgs {
    pub async fn run(self, global: &GlobalArgs) -> Result<()> {
        let config = load_config(global, self.run)?;
        let settings = RunSettings::from_config(&config)?;
        let artifacts = ArtifactRegistry::load(&config.artifacts)?;

        let networks = if self.networks.is_empty() { config.networks_with_keys() } else { self.networks };
        if networks.is_empty() {
            eyre::bail!("no network selected and no deployer key set, pass `--network <NAME>`");
        }

        let mut reports = Vec::with_capacity(networks.len());
        for name in &networks {
            let network = config.network(name)?;
            let deployer = deployer(&network)?;
            let chain = chain::connect(&network);
            let artifact = artifacts.get(chain.kind()).wrap_err_with(|| format!("{name}: cannot deploy"))?;

            if !global.json {
                sh_println!("\nBenchmarking {name} (chain {})", network.chain_id)?;
            }
            let report = BenchmarkRun::new(chain.as_ref(), &network, deployer, settings.clone())
                .with_summaries(!global.json)
                .run(artifact)
                .await?;
            if !global.json {
                sh_println!("\n{}", report.phase_table())?;
            }
            reports.push(report);
        }

        let parameters = MatrixParameters {
            data_provider_count: settings.data_provider_count,
            update_bound: settings.update_bound.to_string(),
        };
        let matrix = GasCostsMatrix::new(parameters, &reports);
        if global.json {
            let output = BenchmarkOutput { networks: &reports, matrix: &matrix };
            sh_println!("{}", serde_json::to_string_pretty(&output)?)?;
        } else {
            sh_println!("\n{matrix}")?;
        }
        Ok(())
    }
}
