//! Drives one network through every phase of a benchmark run.

use crate::{
    artifacts::ContractArtifact,
    chain::OracleChain,
    funding::{fund_providers, refund_providers},
    measure::Meter,
    phases::{self, UpdateBound},
    wallets::DataProviders,
};
use alloy_primitives::{Address, U256};
use alloy_signer_local::PrivateKeySigner;
use eyre::{Result, WrapErr};
use oracle_bench_common::{GasTracker, NetworkReport, Phase, units::parse_ether};
use oracle_bench_config::{Config, ResolvedNetwork};
use std::time::Duration;

/// Parameters of a run, resolved from the configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSettings {
    pub data_provider_count: usize,
    /// Wei sent to each data provider.
    pub fund_amount: U256,
    pub update_bound: UpdateBound,
    pub refund: bool,
}

impl RunSettings {
    pub fn from_config(config: &Config) -> Result<Self> {
        let fund_amount = parse_ether(&config.fund_amount)
            .wrap_err_with(|| format!("invalid fund amount `{}`", config.fund_amount))?;
        let update_bound = match config.duration_minutes {
            Some(minutes) => UpdateBound::Duration {
                total: Duration::from_secs(minutes.saturating_mul(60)),
                interval: Duration::from_millis(config.update_interval_ms),
            },
            None => UpdateBound::Count(config.max_updates),
        };
        Ok(Self { data_provider_count: config.data_provider_count, fund_amount, update_bound, refund: config.refund })
    }
}

/// One benchmark run against one network.
///
/// The run owns the gas tracker every phase writes into; the tracker's final state is returned
/// as a [`NetworkReport`].
pub struct BenchmarkRun<'a> {
    chain: &'a dyn OracleChain,
    chain_id: u64,
    fallback_gas_price: Option<u128>,
    deployer: PrivateKeySigner,
    settings: RunSettings,
    tracker: GasTracker,
    print_summaries: bool,
}

impl<'a> BenchmarkRun<'a> {
    pub fn new(
        chain: &'a dyn OracleChain,
        network: &ResolvedNetwork,
        deployer: PrivateKeySigner,
        settings: RunSettings,
    ) -> Self {
        Self {
            chain,
            chain_id: network.chain_id,
            fallback_gas_price: network.fallback_gas_price,
            deployer,
            settings,
            tracker: GasTracker::new(),
            print_summaries: true,
        }
    }

    /// Whether to print a summary after each phase.
    pub fn with_summaries(mut self, print: bool) -> Self {
        self.print_summaries = print;
        self
    }

    pub fn tracker(&self) -> &GasTracker {
        &self.tracker
    }

    fn meter(&self) -> Meter<'_> {
        Meter::new(self.chain, &self.tracker, self.fallback_gas_price)
    }

    /// Deploys the oracle, then runs every other phase against it.
    pub async fn run(self, artifact: &ContractArtifact) -> Result<NetworkReport> {
        let contract = phases::deploy(&self.meter(), &self.deployer, artifact)
            .await
            .wrap_err_with(|| format!("{}: deployment failed", self.chain.name()))?;
        self.print_summary(Phase::Deployment)?;
        self.run_existing(contract).await
    }

    /// Runs every phase after deployment against an already deployed oracle.
    pub async fn run_existing(self, contract: Address) -> Result<NetworkReport> {
        let name = self.chain.name();
        let meter = self.meter();

        let providers = DataProviders::generate(self.settings.data_provider_count);
        fund_providers(self.chain, &self.deployer, &providers, self.settings.fund_amount)
            .await
            .wrap_err_with(|| format!("{name}: funding failed"))?;

        phases::register(&meter, contract, &providers)
            .await
            .wrap_err_with(|| format!("{name}: {} phase failed", Phase::Registering))?;
        self.print_summary(Phase::Registering)?;

        let updates = phases::update(&meter, contract, &providers, self.settings.update_bound)
            .await
            .wrap_err_with(|| format!("{name}: {} phase failed", Phase::UpdatingPrices))?;
        debug!(network = name, updates, "update phase done");
        self.print_summary(Phase::UpdatingPrices)?;

        let price = phases::finalize(&meter, contract, &self.deployer)
            .await
            .wrap_err_with(|| format!("{name}: {} phase failed", Phase::Finalize))?;
        self.print_summary(Phase::Finalize)?;
        if self.print_summaries {
            sh_println!("Finalized price: {price}")?;
        }

        if self.settings.refund {
            let refund = refund_providers(self.chain, &providers, self.deployer.address()).await;
            if refund.failed > 0 {
                sh_warn!("{name}: {} of {} data provider refunds failed", refund.failed, providers.len())?;
            }
            debug!(network = name, ?refund, "refunded data providers");
        }

        Ok(NetworkReport {
            network: name.to_string(),
            chain_id: self.chain_id,
            contract: Some(contract),
            gas: self.tracker.snapshot(),
        })
    }

    fn print_summary(&self, phase: Phase) -> Result<()> {
        if self.print_summaries {
            sh_println!("\n{}", phases::summary(&self.tracker, phase))?;
        }
        Ok(())
    }
}
