use crate::cmd::{
    benchmark::BenchmarkArgs, estimate::EstimateArgs, finalize::FinalizeArgs, networks::NetworksArgs,
    run::RunArgs,
};
use clap::{ArgAction, Parser, Subcommand, ValueHint};
use eyre::Result;
use std::{future::Future, path::PathBuf};
use tracing_subscriber::{EnvFilter, fmt};

/// Measure what the SimpleOracle costs to run on EVM networks.
#[derive(Parser)]
#[command(name = "oracle-bench", version, next_display_order = None)]
pub struct OracleBench {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub cmd: OracleBenchSubcommand,
}

#[derive(Subcommand)]
pub enum OracleBenchSubcommand {
    /// Deploy the oracle and run the full benchmark on one or more networks.
    #[command(visible_alias = "b")]
    Benchmark(BenchmarkArgs),

    /// Register, update and finalize against an already deployed oracle.
    Run(RunArgs),

    /// Finalize the price of a deployed oracle.
    Finalize(FinalizeArgs),

    /// Estimate what a benchmark run costs at current gas prices.
    Estimate(EstimateArgs),

    /// List the known networks.
    #[command(visible_alias = "ls")]
    Networks(NetworksArgs),
}

/// Arguments shared by every subcommand.
#[derive(Clone, Debug, Default, Parser)]
#[command(next_help_heading = "Display options")]
pub struct GlobalArgs {
    /// Path to the configuration file.
    #[arg(long, global = true, value_hint = ValueHint::FilePath, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print machine readable JSON instead of tables.
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level of the log output.
    ///
    /// Pass multiple times to increase the verbosity (e.g. -v, -vv, -vvv).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbosity: u8,

    /// Do not print progress and warnings.
    #[arg(short, long, global = true, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl GlobalArgs {
    /// Applies the display options and installs the log subscriber.
    pub fn init(&self) -> Result<()> {
        oracle_bench_common::shell::set_quiet(self.quiet);

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("oracle_bench={}", self.log_level())));
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(self.verbosity > 1)
            .try_init()
            .map_err(|err| eyre::eyre!("failed to initialize tracing subscriber: {err}"))
    }

    fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbosity {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Runs `fut` to completion on a new multi-threaded runtime.
    pub fn block_on<F: Future>(&self, fut: F) -> Result<F::Output> {
        let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
        Ok(runtime.block_on(fut))
    }
}
