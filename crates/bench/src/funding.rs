//! Moving ether between the deployer and the data providers.

use crate::{
    chain::{OracleChain, TRANSFER_GAS, TxOutcome},
    error::{BenchError, BenchResult},
    wallets::DataProviders,
};
use alloy_primitives::{Address, U256};
use alloy_signer_local::PrivateKeySigner;
use oracle_bench_common::units::format_ether;

/// Sends `amount` wei from `funder` to every data provider, one after the other.
///
/// The first failed transfer aborts funding.
pub async fn fund_providers(
    chain: &dyn OracleChain,
    funder: &PrivateKeySigner,
    providers: &DataProviders,
    amount: U256,
) -> BenchResult<Vec<TxOutcome>> {
    let mut outcomes = Vec::with_capacity(providers.len());
    for provider in providers {
        let to = provider.address();
        let outcome = chain.transfer(funder, to, amount).await.map_err(|source| {
            BenchError::FundingFailure { provider: to, source: Box::new(source) }
        })?;
        info!(
            network = chain.name(),
            provider = %to,
            amount = %format_ether(amount),
            tx = %outcome.tx_hash,
            "funded data provider"
        );
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

/// Result of sending the providers' leftover funds back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RefundSummary {
    /// Total wei returned.
    pub refunded: U256,
    /// Wallets whose transfer succeeded.
    pub transfers: usize,
    /// Wallets skipped because their balance did not cover the transfer fee.
    pub skipped: usize,
    /// Wallets whose transfer failed.
    pub failed: usize,
}

/// Sends each provider's balance minus the transfer fee back to `recipient`.
///
/// Failures are logged and counted, never returned.
pub async fn refund_providers(
    chain: &dyn OracleChain,
    providers: &DataProviders,
    recipient: Address,
) -> RefundSummary {
    let mut summary = RefundSummary::default();
    for provider in providers {
        let from = provider.address();
        match refund_one(chain, provider, recipient).await {
            Ok(Some(value)) => {
                summary.refunded += value;
                summary.transfers += 1;
                debug!(network = chain.name(), provider = %from, value = %format_ether(value), "refunded");
            }
            Ok(None) => {
                summary.skipped += 1;
                debug!(network = chain.name(), provider = %from, "balance does not cover the transfer fee");
            }
            Err(err) => {
                summary.failed += 1;
                warn!(network = chain.name(), provider = %from, %err, "failed to refund data provider");
            }
        }
    }
    summary
}

async fn refund_one(
    chain: &dyn OracleChain,
    provider: &PrivateKeySigner,
    recipient: Address,
) -> BenchResult<Option<U256>> {
    let balance = chain.balance(provider.address()).await?;
    let fee = U256::from(chain.gas_price().await?) * U256::from(TRANSFER_GAS);
    if balance <= fee {
        return Ok(None);
    }
    let value = balance - fee;
    chain.transfer(provider, recipient, value).await?;
    Ok(Some(value))
}
