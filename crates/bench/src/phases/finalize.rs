use crate::{contract::OracleCall, error::BenchResult, measure::Meter};
use alloy_primitives::{Address, U256};
use alloy_signer_local::PrivateKeySigner;
use oracle_bench_common::Phase;

/// Finalizes the price from the oracle's owner and returns the finalized price.
pub async fn finalize(meter: &Meter<'_>, contract: Address, owner: &PrivateKeySigner) -> BenchResult<U256> {
    meter.sample_l1_gas_price(Phase::Finalize).await;
    let measured = meter
        .measure(Phase::Finalize, owner.address(), meter.chain.send(owner, contract, OracleCall::Finalize))
        .await?;
    let price = meter.chain.price(contract).await?;
    info!(
        network = meter.chain.name(),
        tx = %measured.outcome.tx_hash,
        %price,
        "price finalized"
    );
    Ok(price)
}
