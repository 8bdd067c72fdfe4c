//! The on-chain phases of a benchmark run.
//!
//! Each runner sends its transactions through a [`Meter`](crate::measure::Meter), which records them into the run's
//! gas tracker. A runner returns only once every transaction it started has been recorded, so
//! the next phase never overlaps with it.

use oracle_bench_common::{GasTracker, Phase};
use std::fmt::Write;

mod deploy;
pub use deploy::deploy;

mod finalize;
pub use finalize::finalize;

mod register;
pub use register::register;

mod update;
pub use update::{UpdateBound, update};

/// Human readable summary of `phase`, printed after it completes.
pub fn summary(tracker: &GasTracker, phase: Phase) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} summary:", phase.label());
    let _ = writeln!(out, "- Transactions: {}", tracker.transaction_count(phase));
    let _ = writeln!(out, "- Wallets involved: {}", tracker.provider_count(phase));
    let _ = writeln!(out, "- Total gas used: {}", tracker.total_gas_used_formatted(phase));
    let _ = writeln!(out, "- Total gas cost: {} ETH", tracker.total_gas_cost_formatted(phase));
    let _ = writeln!(
        out,
        "- Total balance difference: {} ETH",
        tracker.total_balance_difference_formatted(phase)
    );
    let _ = writeln!(out, "- L2 gas price: {} gwei", tracker.gas_price_formatted(phase));
    let _ = write!(
        out,
        "- L1 gas price: {}",
        tracker.l1_gas_price_formatted(phase).map_or_else(|| "-".to_string(), |p| format!("{p} gwei"))
    );
    out
}
