use crate::{contract::OracleCall, error::BenchResult, measure::Meter, wallets::DataProviders};
use alloy_primitives::{Address, U256};
use alloy_signer_local::PrivateKeySigner;
use futures::future::try_join_all;
use oracle_bench_common::Phase;
use rand::Rng;
use std::{fmt, time::Duration};
use tokio::time::Instant;

/// Prices are drawn uniformly from `0..MAX_PRICE`.
const MAX_PRICE: u64 = 1_000;

/// How long each data provider keeps submitting prices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateBound {
    /// A fixed number of updates per provider.
    Count(u32),
    /// Update until the deadline passes, pausing `interval` between updates.
    Duration { total: Duration, interval: Duration },
}

impl fmt::Display for UpdateBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n} updates per provider"),
            Self::Duration { total, .. } => write!(f, "{} seconds of updates per provider", total.as_secs()),
        }
    }
}

/// Runs the update loop of every provider concurrently and returns the number of updates sent.
pub async fn update(
    meter: &Meter<'_>,
    contract: Address,
    providers: &DataProviders,
    bound: UpdateBound,
) -> BenchResult<usize> {
    if providers.is_empty() {
        return Ok(0);
    }
    meter.sample_l1_gas_price(Phase::UpdatingPrices).await;

    let counts =
        try_join_all(providers.iter().map(|provider| update_loop(meter, contract, provider, bound))).await?;
    Ok(counts.into_iter().sum())
}

async fn update_loop(
    meter: &Meter<'_>,
    contract: Address,
    provider: &PrivateKeySigner,
    bound: UpdateBound,
) -> BenchResult<usize> {
    let started = Instant::now();
    let mut updates = 0usize;
    loop {
        let next_at = match bound {
            UpdateBound::Count(n) if updates >= n as usize => break,
            UpdateBound::Count(_) => None,
            UpdateBound::Duration { total, .. } if started.elapsed() >= total => break,
            UpdateBound::Duration { interval, .. } => Some(Instant::now() + interval),
        };

        let price = U256::from(rand::rng().random_range(0..MAX_PRICE));
        let measured = meter
            .measure(
                Phase::UpdatingPrices,
                provider.address(),
                meter.chain.send(provider, contract, OracleCall::UpdatePrice(price)),
            )
            .await?;
        updates += 1;
        info!(
            network = meter.chain.name(),
            provider = %provider.address(),
            %price,
            tx = %measured.outcome.tx_hash,
            gas_used = measured.outcome.gas_used,
            "price updated"
        );

        if let Some(next_at) = next_at {
            tokio::time::sleep_until(next_at).await;
        }
    }
    Ok(updates)
}
