use crate::{
    contract::OracleCall,
    error::{BenchError, BenchResult},
    measure::Meter,
    wallets::DataProviders,
};
use alloy_primitives::Address;
use futures::future::try_join_all;
use oracle_bench_common::Phase;

/// Registers every data provider with the oracle, all providers concurrently.
///
/// Once all registrations are mined, each provider must have been assigned a non-zero id.
pub async fn register(meter: &Meter<'_>, contract: Address, providers: &DataProviders) -> BenchResult<()> {
    if providers.is_empty() {
        return Ok(());
    }
    meter.sample_l1_gas_price(Phase::Registering).await;

    try_join_all(providers.iter().map(|provider| async move {
        let measured = meter
            .measure(
                Phase::Registering,
                provider.address(),
                meter.chain.send(provider, contract, OracleCall::Register),
            )
            .await?;
        info!(
            network = meter.chain.name(),
            provider = %provider.address(),
            tx = %measured.outcome.tx_hash,
            "registered data provider"
        );
        Ok::<_, BenchError>(())
    }))
    .await?;

    for provider in providers.addresses() {
        let state = meter.chain.provider_state(contract, provider).await?;
        if state.id.is_zero() {
            return Err(BenchError::NotRegistered(provider));
        }
        debug!(network = meter.chain.name(), %provider, id = %state.id, "data provider registered");
    }
    Ok(())
}
