use crate::opts::{OracleBench, OracleBenchSubcommand};
use clap::Parser;
use eyre::Result;

/// Run the `oracle-bench` command line interface.
pub fn run() -> Result<()> {
    setup()?;

    let args = OracleBench::parse();
    args.global.init()?;

    run_command(args)
}

/// Install the error report handler and load `.env`.
pub fn setup() -> Result<()> {
    color_eyre::install()?;
    oracle_bench_config::load_dotenv();

    Ok(())
}

/// Run the subcommand.
pub fn run_command(args: OracleBench) -> Result<()> {
    let global = &args.global;
    match args.cmd {
        OracleBenchSubcommand::Benchmark(cmd) => global.block_on(cmd.run(global))?,
        OracleBenchSubcommand::Run(cmd) => global.block_on(cmd.run(global))?,
        OracleBenchSubcommand::Finalize(cmd) => global.block_on(cmd.run(global))?,
        OracleBenchSubcommand::Estimate(cmd) => global.block_on(cmd.run(global))?,
        OracleBenchSubcommand::Networks(cmd) => cmd.run(global),
    }
}
