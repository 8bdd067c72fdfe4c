//! Turns mined transactions into gas tracker records.

use crate::{
    chain::{OracleChain, TxOutcome},
    error::{BenchError, BenchResult},
};
use alloy_primitives::{Address, U256};
use oracle_bench_common::{GasTracker, Phase, ProviderRecord};
use std::future::Future;

/// A recorded transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Measurement {
    pub outcome: TxOutcome,
    pub gas_price: u128,
    pub record: ProviderRecord,
}

/// Where a phase records its transactions.
#[derive(Clone, Copy)]
pub struct Meter<'a> {
    pub chain: &'a dyn OracleChain,
    pub tracker: &'a GasTracker,
    /// Price used when neither the receipt nor the node report one.
    pub fallback_gas_price: Option<u128>,
}

impl<'a> Meter<'a> {
    pub fn new(chain: &'a dyn OracleChain, tracker: &'a GasTracker, fallback_gas_price: Option<u128>) -> Self {
        Self { chain, tracker, fallback_gas_price }
    }

    /// Sends `tx` from `from` and records it into `phase`.
    ///
    /// The balance of `from` is read before sending and after the receipt.
    pub async fn measure(
        &self,
        phase: Phase,
        from: Address,
        tx: impl Future<Output = BenchResult<TxOutcome>>,
    ) -> BenchResult<Measurement> {
        let balance_before = self.chain.balance(from).await?;
        let outcome = tx.await?;
        let balance_after = self.chain.balance(from).await?;

        if outcome.gas_used == 0 {
            return Err(BenchError::MissingGasInfo { phase, tx_hash: outcome.tx_hash });
        }
        let gas_price = self.resolve_gas_price(phase, &outcome).await?;

        let record = self.tracker.record_transaction(
            phase,
            from,
            U256::from(outcome.gas_used),
            U256::from(gas_price),
            balance_before,
            balance_after,
        );
        Ok(Measurement { outcome, gas_price, record })
    }

    /// Effective price of the receipt, else the current network price, else the fallback.
    pub async fn resolve_gas_price(&self, phase: Phase, outcome: &TxOutcome) -> BenchResult<u128> {
        if let Some(price) = outcome.effective_gas_price.filter(|price| *price != 0) {
            return Ok(price);
        }
        match self.chain.gas_price().await {
            Ok(price) if price != 0 => {
                debug!(%phase, tx = %outcome.tx_hash, price, "receipt has no gas price, using network price");
                return Ok(price);
            }
            Ok(_) => debug!(%phase, "network reported a zero gas price"),
            Err(err) => debug!(%phase, %err, "failed to query network gas price"),
        }
        match self.fallback_gas_price {
            Some(price) => {
                warn!(
                    network = self.chain.name(),
                    %phase,
                    tx = %outcome.tx_hash,
                    price,
                    "no gas price available, using configured fallback"
                );
                Ok(price)
            }
            None => Err(BenchError::MissingGasInfo { phase, tx_hash: outcome.tx_hash }),
        }
    }

    /// Stores the current L1 gas price for `phase`. Failures are logged and ignored.
    pub async fn sample_l1_gas_price(&self, phase: Phase) {
        match self.chain.l1_gas_price().await {
            Ok(Some(price)) => self.tracker.set_l1_gas_price(phase, U256::from(price)),
            Ok(None) => {}
            Err(err) => warn!(network = self.chain.name(), %phase, %err, "failed to read L1 gas price"),
        }
    }
}
