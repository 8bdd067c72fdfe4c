//! # oracle-bench-common
//!
//! Gas accounting, unit formatting and report rendering shared by the oracle benchmark.

#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
pub mod shell;

pub mod gas_tracker;
pub mod report;
pub mod units;

pub use gas_tracker::{GasSnapshot, GasTracker, OperationRecord, Phase, ProviderRecord};
pub use report::{CostEstimate, CostEstimates, GasCostsMatrix, MatrixParameters, NetworkReport, PhaseTable};
