use crate::{
    artifacts::ContractArtifact,
    error::{BenchError, BenchResult},
    measure::Meter,
};
use alloy_primitives::Address;
use alloy_signer_local::PrivateKeySigner;
use oracle_bench_common::Phase;

/// Deploys the oracle from `deployer` and returns its address.
pub async fn deploy(
    meter: &Meter<'_>,
    deployer: &PrivateKeySigner,
    artifact: &ContractArtifact,
) -> BenchResult<Address> {
    meter.sample_l1_gas_price(Phase::Deployment).await;
    let measured = meter
        .measure(Phase::Deployment, deployer.address(), meter.chain.deploy(deployer, artifact))
        .await?;
    let address = measured
        .outcome
        .contract_address
        .ok_or(BenchError::NotDeployed(measured.outcome.tx_hash))?;
    info!(
        network = meter.chain.name(),
        %address,
        tx = %measured.outcome.tx_hash,
        gas_used = measured.outcome.gas_used,
        "deployed SimpleOracle"
    );
    Ok(address)
}
