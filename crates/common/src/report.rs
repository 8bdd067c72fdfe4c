//! Text and JSON renderings of benchmark results.

use crate::{
    gas_tracker::{GasSnapshot, Phase},
    units::{balance_delta, format_ether, format_gwei},
};
use alloy_primitives::{Address, I256, U256};
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, presets::ASCII_MARKDOWN};
use serde::Serialize;
use std::fmt::{self, Display};

/// Final state of one benchmarked network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkReport {
    pub network: String,
    pub chain_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract: Option<Address>,
    pub gas: GasSnapshot,
}

impl NetworkReport {
    pub fn phase_table(&self) -> PhaseTable {
        PhaseTable::new(&self.network, self.gas.clone())
    }
}

/// Per-phase table of a single network, ending with a `Total` row.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseTable {
    pub network: String,
    pub gas: GasSnapshot,
}

impl PhaseTable {
    pub fn new(network: impl Into<String>, gas: GasSnapshot) -> Self {
        Self { network: network.into(), gas }
    }
}

impl Display for PhaseTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new();
        table.load_preset(ASCII_MARKDOWN);
        table.set_header(header([
            "Operation",
            "Gas Cost (ETH)",
            "Gas Used",
            "Balance Difference (ETH)",
            "L2 Gas Price (gwei)",
            "L1 Gas Price (gwei)",
            "Txs",
        ]));

        for (phase, record) in self.gas.iter() {
            table.add_row([
                Cell::new(phase.label()).fg(Color::Blue),
                amount(format_ether(record.total_gas_cost)),
                amount(record.total_gas_used),
                amount(format_ether(record.total_balance_difference)),
                amount(format_gwei(record.gas_price)),
                amount(record.l1_gas_price.map(format_gwei).unwrap_or_else(|| "-".to_string())),
                amount(record.transaction_count()),
            ]);
        }

        let totals = self.gas.totals();
        table.add_row([
            Cell::new("Total").add_attribute(Attribute::Bold),
            amount(format_ether(totals.gas_cost)).add_attribute(Attribute::Bold),
            amount(totals.gas_used).add_attribute(Attribute::Bold),
            amount(format_ether(totals.balance_difference)).add_attribute(Attribute::Bold),
            Cell::new(""),
            Cell::new(""),
            amount(totals.transactions).add_attribute(Attribute::Bold),
        ]);

        writeln!(f, "Gas report for {}:", self.network)?;
        writeln!(f, "{table}")
    }
}

/// Run parameters echoed above the comparison matrix.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixParameters {
    pub data_provider_count: usize,
    /// Human readable bound of the update phase, e.g. `5 updates per provider`.
    pub update_bound: String,
}

/// One network's line in the comparison matrix. All costs are in wei.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixRow {
    pub network: String,
    pub gas_price: U256,
    pub deploy_cost: U256,
    pub deploy_gas_used: U256,
    pub register_cost: U256,
    pub register_gas_used: U256,
    pub update_cost: U256,
    pub update_gas_used: U256,
    pub avg_update_cost: U256,
    pub update_txs: usize,
    pub finalize_cost: U256,
    pub finalize_gas_used: U256,
    pub total_cost: U256,
    pub total_gas_used: U256,
}

impl From<&NetworkReport> for MatrixRow {
    fn from(report: &NetworkReport) -> Self {
        let gas = &report.gas;
        let totals = gas.totals();
        Self {
            network: report.network.clone(),
            gas_price: gas.network_gas_price(),
            deploy_cost: gas.deployment.total_gas_cost,
            deploy_gas_used: gas.deployment.total_gas_used,
            register_cost: gas.registering.total_gas_cost,
            register_gas_used: gas.registering.total_gas_used,
            update_cost: gas.updating_prices.total_gas_cost,
            update_gas_used: gas.updating_prices.total_gas_used,
            avg_update_cost: gas.phase(Phase::UpdatingPrices).average_gas_cost(),
            update_txs: gas.updating_prices.transaction_count(),
            finalize_cost: gas.finalize.total_gas_cost,
            finalize_gas_used: gas.finalize.total_gas_used,
            total_cost: totals.gas_cost,
            total_gas_used: totals.gas_used,
        }
    }
}

/// Difference between the first and the second network of a two-network comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixDelta {
    pub total_cost: I256,
    pub total_gas_used: I256,
}

/// Cross-network comparison of a benchmark run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GasCostsMatrix {
    pub parameters: MatrixParameters,
    pub rows: Vec<MatrixRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<MatrixDelta>,
}

impl GasCostsMatrix {
    pub fn new(parameters: MatrixParameters, reports: &[NetworkReport]) -> Self {
        let rows = reports.iter().map(MatrixRow::from).collect::<Vec<_>>();
        let delta = match rows.as_slice() {
            [first, second] => Some(MatrixDelta {
                total_cost: balance_delta(first.total_cost, second.total_cost),
                total_gas_used: balance_delta(first.total_gas_used, second.total_gas_used),
            }),
            _ => None,
        };
        Self { parameters, rows, delta }
    }

    fn section<const N: usize>(
        &self,
        f: &mut fmt::Formatter<'_>,
        title: &str,
        headers: [&str; N],
        row: impl Fn(&MatrixRow) -> [Cell; N],
    ) -> fmt::Result {
        let mut table = Table::new();
        table.load_preset(ASCII_MARKDOWN);
        table.set_header(header(headers));
        for r in &self.rows {
            table.add_row(row(r));
        }
        writeln!(f, "{title}:")?;
        writeln!(f, "{table}")?;
        writeln!(f)
    }
}

impl Display for GasCostsMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "========= Gas Costs Matrix =========")?;
        writeln!(f)?;
        writeln!(f, "Parameters used:")?;
        writeln!(f, "- Update bound: {}", self.parameters.update_bound)?;
        writeln!(f, "- Data providers: {}", self.parameters.data_provider_count)?;
        writeln!(f)?;

        self.section(
            f,
            "Deployment Data",
            ["Network", "Gas Price (gwei)", "Deploy (ETH)", "Deploy Gas Used"],
            |r| {
                [
                    network(&r.network),
                    amount(format_gwei(r.gas_price)),
                    amount(format_ether(r.deploy_cost)),
                    amount(r.deploy_gas_used),
                ]
            },
        )?;
        self.section(
            f,
            "Registration Data",
            ["Network", "registerDataProvider (ETH)", "Register Gas Used"],
            |r| {
                [
                    network(&r.network),
                    amount(format_ether(r.register_cost)),
                    amount(r.register_gas_used),
                ]
            },
        )?;
        self.section(
            f,
            "Update Price Data",
            [
                "Network",
                "updatePrice (ETH)",
                "Update Gas Used",
                "Avg. per updatePrice (ETH)",
                "updatePrice Txs",
            ],
            |r| {
                [
                    network(&r.network),
                    amount(format_ether(r.update_cost)),
                    amount(r.update_gas_used),
                    amount(format_ether(r.avg_update_cost)),
                    amount(r.update_txs),
                ]
            },
        )?;
        self.section(
            f,
            "Finalize Price Data",
            ["Network", "finalizePrice (ETH)", "Finalize Gas Used"],
            |r| {
                [
                    network(&r.network),
                    amount(format_ether(r.finalize_cost)),
                    amount(r.finalize_gas_used),
                ]
            },
        )?;

        let mut summary = Table::new();
        summary.load_preset(ASCII_MARKDOWN);
        summary.set_header(header(["Network", "Total Cost (ETH)", "Total Gas Used"]));
        for r in &self.rows {
            summary.add_row([
                network(&r.network),
                amount(format_ether(r.total_cost)),
                amount(r.total_gas_used),
            ]);
        }
        if let Some(delta) = &self.delta {
            summary.add_row([
                Cell::new("Delta").add_attribute(Attribute::Bold),
                amount(format_ether(delta.total_cost)),
                amount(delta.total_gas_used),
            ]);
        }
        writeln!(f, "Summary Data:")?;
        writeln!(f, "{summary}")
    }
}

/// Cost of one full run on a network at its current gas price.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub network: String,
    pub gas_used: u64,
    /// `None` if the gas price could not be fetched.
    pub gas_price: Option<U256>,
    pub cost: U256,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CostEstimate {
    pub fn new(network: impl Into<String>, gas_used: u64, gas_price: U256) -> Self {
        Self {
            network: network.into(),
            gas_used,
            gas_price: Some(gas_price),
            cost: gas_price * U256::from(gas_used),
            error: None,
        }
    }

    /// An estimate whose gas price could not be fetched. It contributes nothing to the total.
    pub fn failed(network: impl Into<String>, gas_used: u64, error: impl ToString) -> Self {
        Self { network: network.into(), gas_used, gas_price: None, cost: U256::ZERO, error: Some(error.to_string()) }
    }
}

/// Estimated costs of several networks, with their total.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimates {
    pub estimates: Vec<CostEstimate>,
    pub total: U256,
}

impl FromIterator<CostEstimate> for CostEstimates {
    fn from_iter<I: IntoIterator<Item = CostEstimate>>(iter: I) -> Self {
        let estimates = iter.into_iter().collect::<Vec<_>>();
        let total = estimates.iter().map(|e| e.cost).sum();
        Self { estimates, total }
    }
}

impl Display for CostEstimates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new();
        table.load_preset(ASCII_MARKDOWN);
        table.set_header(header(["Network", "Gas Used", "Gas Price (gwei)", "Cost (ETH)"]));
        for estimate in &self.estimates {
            let price = match (&estimate.gas_price, &estimate.error) {
                (Some(price), _) => amount(format_gwei(*price)),
                (None, Some(err)) => Cell::new(format!("error: {err}")).fg(Color::Red),
                (None, None) => amount("-"),
            };
            table.add_row([
                network(&estimate.network),
                amount(estimate.gas_used),
                price,
                amount(format_ether(estimate.cost)),
            ]);
        }
        table.add_row([
            Cell::new("Total").add_attribute(Attribute::Bold),
            Cell::new(""),
            Cell::new(""),
            amount(format_ether(self.total)).add_attribute(Attribute::Bold),
        ]);
        writeln!(f, "{table}")
    }
}

fn header<const N: usize>(names: [&str; N]) -> [Cell; N] {
    names.map(|name| Cell::new(name).add_attribute(Attribute::Bold).fg(Color::Blue))
}

fn network(name: &str) -> Cell {
    Cell::new(name).fg(Color::Blue)
}

fn amount(value: impl ToString) -> Cell {
    Cell::new(value.to_string()).set_alignment(CellAlignment::Right)
}
