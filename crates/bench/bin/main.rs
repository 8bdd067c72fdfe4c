//! The `oracle-bench` CLI: deploy SimpleOracle, drive its data providers and compare gas costs
//! across networks.

use oracle_bench::args::run;

fn main() {
    if let Err(err) = run() {
        let _ = oracle_bench_common::sh_err!("{err:?}");
        std::process::exit(1);
    }
}
