//! Gas and balance accounting for a benchmark run.
//!
//! A [`GasTracker`] keeps one [`OperationRecord`] per [`Phase`]. Every transaction sent during a
//! phase is appended as a [`ProviderRecord`] and folded into the phase totals in the same critical
//! section, so concurrently running wallet tasks never lose an update.

use crate::{
    report::PhaseTable,
    units::{balance_delta, format_ether, format_gwei},
};
use alloy_primitives::{Address, I256, U256};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

/// A discrete stage of the benchmark run with its own gas aggregate.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Phase {
    Deployment,
    Registering,
    UpdatingPrices,
    Finalize,
}

impl Phase {
    /// Human readable name used as the row label in reports.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Deployment => "Deploy",
            Self::Registering => "Register",
            Self::UpdatingPrices => "Update Prices",
            Self::Finalize => "Finalize",
        }
    }

    /// Returns all phases in run order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

/// Cost of a single transaction sent by a wallet during a phase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRecord {
    pub address: Address,
    pub gas_used: U256,
    pub gas_cost: U256,
    pub balance_difference: I256,
}

/// Aggregated gas figures of one phase.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRecord {
    pub total_gas_cost: U256,
    pub total_gas_used: U256,
    pub total_balance_difference: I256,
    /// Last observed effective (L2) gas price.
    pub gas_price: U256,
    /// Last observed L1 gas price, only tracked on rollups.
    pub l1_gas_price: Option<U256>,
    /// One entry per transaction, in the order they were recorded.
    pub per_provider: Vec<ProviderRecord>,
}

impl OperationRecord {
    fn push(&mut self, record: ProviderRecord, gas_price: U256) {
        self.total_gas_used += record.gas_used;
        self.total_gas_cost += record.gas_cost;
        self.total_balance_difference += record.balance_difference;
        self.gas_price = gas_price;
        self.per_provider.push(record);
    }

    /// Returns `true` if no transaction was recorded for this phase.
    pub fn is_empty(&self) -> bool {
        self.per_provider.is_empty()
    }

    /// Number of recorded transactions.
    pub fn transaction_count(&self) -> usize {
        self.per_provider.len()
    }

    /// Number of distinct wallets that sent a transaction.
    pub fn provider_count(&self) -> usize {
        self.per_provider.iter().map(|r| r.address).collect::<HashSet<_>>().len()
    }

    /// Mean cost per transaction, zero when the phase is empty.
    pub fn average_gas_cost(&self) -> U256 {
        match self.per_provider.len() {
            0 => U256::ZERO,
            len => self.total_gas_cost / U256::from(len),
        }
    }

    /// Median cost per transaction, zero when the phase is empty.
    ///
    /// For an even number of transactions this is the mean of the two central costs.
    pub fn median_gas_cost(&self) -> U256 {
        let mut costs = self.per_provider.iter().map(|r| r.gas_cost).collect::<Vec<_>>();
        if costs.is_empty() {
            return U256::ZERO;
        }
        costs.sort_unstable();
        let mid = costs.len() / 2;
        if costs.len() % 2 == 0 {
            (costs[mid - 1] + costs[mid]) / U256::from(2)
        } else {
            costs[mid]
        }
    }

    /// Returns the first record sent by `address`.
    pub fn provider_info(&self, address: Address) -> Option<&ProviderRecord> {
        self.per_provider.iter().find(|r| r.address == address)
    }
}

/// Sums of all phases.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseTotals {
    pub gas_cost: U256,
    pub gas_used: U256,
    pub balance_difference: I256,
    pub transactions: usize,
}

/// Point-in-time copy of every phase record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasSnapshot {
    pub deployment: OperationRecord,
    pub registering: OperationRecord,
    pub updating_prices: OperationRecord,
    pub finalize: OperationRecord,
}

impl GasSnapshot {
    pub fn phase(&self, phase: Phase) -> &OperationRecord {
        match phase {
            Phase::Deployment => &self.deployment,
            Phase::Registering => &self.registering,
            Phase::UpdatingPrices => &self.updating_prices,
            Phase::Finalize => &self.finalize,
        }
    }

    fn phase_mut(&mut self, phase: Phase) -> &mut OperationRecord {
        match phase {
            Phase::Deployment => &mut self.deployment,
            Phase::Registering => &mut self.registering,
            Phase::UpdatingPrices => &mut self.updating_prices,
            Phase::Finalize => &mut self.finalize,
        }
    }

    /// Iterates over `(phase, record)` pairs in run order.
    pub fn iter(&self) -> impl Iterator<Item = (Phase, &OperationRecord)> {
        Phase::all().map(move |phase| (phase, self.phase(phase)))
    }

    pub fn totals(&self) -> PhaseTotals {
        self.iter().fold(PhaseTotals::default(), |mut totals, (_, record)| {
            totals.gas_cost += record.total_gas_cost;
            totals.gas_used += record.total_gas_used;
            totals.balance_difference += record.total_balance_difference;
            totals.transactions += record.transaction_count();
            totals
        })
    }

    /// The gas price a network is quoted at in comparisons.
    ///
    /// Uses the price-update phase, which dominates the run, and falls back to the most recent
    /// phase that observed a non-zero price.
    pub fn network_gas_price(&self) -> U256 {
        if !self.updating_prices.gas_price.is_zero() {
            return self.updating_prices.gas_price;
        }
        self.iter()
            .map(|(_, record)| record.gas_price)
            .filter(|price| !price.is_zero())
            .last()
            .unwrap_or_default()
    }
}

/// Accumulates gas usage, cost and balance deltas across the phases of a benchmark run.
///
/// The tracker is owned by the run and shared by reference with every phase runner. All methods
/// take `&self`.
#[derive(Debug, Default)]
pub struct GasTracker {
    inner: RwLock<GasSnapshot>,
}

impl GasTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one transaction of `address` into `phase` and returns the appended record.
    ///
    /// `gas_cost = gas_used * gas_price` and `balance_difference = balance_before -
    /// balance_after`.
    pub fn record_transaction(
        &self,
        phase: Phase,
        address: Address,
        gas_used: U256,
        gas_price: U256,
        balance_before: U256,
        balance_after: U256,
    ) -> ProviderRecord {
        let record = ProviderRecord {
            address,
            gas_used,
            gas_cost: gas_used * gas_price,
            balance_difference: balance_delta(balance_before, balance_after),
        };
        self.inner.write().phase_mut(phase).push(record.clone(), gas_price);
        record
    }

    /// Stores the L1 gas price observed while `phase` was running.
    pub fn set_l1_gas_price(&self, phase: Phase, price: U256) {
        self.inner.write().phase_mut(phase).l1_gas_price = Some(price);
    }

    /// Returns a copy of the record of `phase`.
    pub fn record(&self, phase: Phase) -> OperationRecord {
        self.inner.read().phase(phase).clone()
    }

    /// Total gas units, in base units.
    pub fn total_gas_used_formatted(&self, phase: Phase) -> String {
        self.inner.read().phase(phase).total_gas_used.to_string()
    }

    /// Total gas cost, in ether.
    pub fn total_gas_cost_formatted(&self, phase: Phase) -> String {
        format_ether(self.inner.read().phase(phase).total_gas_cost)
    }

    /// Total balance difference, in ether.
    pub fn total_balance_difference_formatted(&self, phase: Phase) -> String {
        format_ether(self.inner.read().phase(phase).total_balance_difference)
    }

    /// Last observed L2 gas price, in gwei.
    pub fn gas_price_formatted(&self, phase: Phase) -> String {
        format_gwei(self.inner.read().phase(phase).gas_price)
    }

    /// Last observed L1 gas price, in gwei, if one was recorded.
    pub fn l1_gas_price_formatted(&self, phase: Phase) -> Option<String> {
        self.inner.read().phase(phase).l1_gas_price.map(format_gwei)
    }

    pub fn average_gas_cost(&self, phase: Phase) -> U256 {
        self.inner.read().phase(phase).average_gas_cost()
    }

    pub fn median_gas_cost(&self, phase: Phase) -> U256 {
        self.inner.read().phase(phase).median_gas_cost()
    }

    /// Returns the first record `address` produced in `phase`, if any.
    pub fn provider_info(&self, phase: Phase, address: Address) -> Option<ProviderRecord> {
        self.inner.read().phase(phase).provider_info(address).cloned()
    }

    pub fn provider_count(&self, phase: Phase) -> usize {
        self.inner.read().phase(phase).provider_count()
    }

    pub fn transaction_count(&self, phase: Phase) -> usize {
        self.inner.read().phase(phase).transaction_count()
    }

    /// Clears `phase`, or every phase if `None`.
    pub fn reset(&self, phase: Option<Phase>) {
        let mut inner = self.inner.write();
        match phase {
            Some(phase) => *inner.phase_mut(phase) = OperationRecord::default(),
            None => *inner = GasSnapshot::default(),
        }
    }

    pub fn snapshot(&self) -> GasSnapshot {
        self.inner.read().clone()
    }

    /// Serializes the current state to JSON.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&*self.inner.read())
    }

    /// Renders the per-phase table of this run, ending with a `Total` row.
    pub fn display_as_table(&self, network: &str) -> String {
        PhaseTable::new(network, self.snapshot()).to_string()
    }
}
