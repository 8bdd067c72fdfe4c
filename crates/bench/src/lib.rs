//! # oracle-bench
//!
//! Deploys the SimpleOracle contract, drives a set of data provider wallets through
//! registration, price updates and finalization, and reports what every step cost.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate oracle_bench_common;

#[macro_use]
extern crate tracing;

pub mod args;
pub mod cmd;
pub mod opts;

pub mod artifacts;
pub mod chain;
pub mod contract;
pub mod error;
pub mod funding;
pub mod measure;
pub mod phases;
pub mod runner;
pub mod wallets;
