use crate::{
    ETHER,
    mock::{DEPLOY_GAS, FINALIZE_GAS, MockChain, ORACLE, REGISTER_GAS},
    network,
};
use alloy_json_abi::JsonAbi;
use alloy_primitives::U256;
use alloy_signer_local::PrivateKeySigner;
use oracle_bench::{
    artifacts::{ArtifactRegistry, ContractArtifact},
    error::BenchError,
    phases::UpdateBound,
    runner::{BenchmarkRun, RunSettings},
};
use oracle_bench_common::{GasCostsMatrix, MatrixParameters, Phase};
use oracle_bench_config::ChainKind;
use similar_asserts::assert_eq;

fn settings(refund: bool) -> RunSettings {
    RunSettings {
        data_provider_count: 3,
        fund_amount: U256::from(10_000_000_000_000u64),
        update_bound: UpdateBound::Count(5),
        refund,
    }
}

fn registry() -> ArtifactRegistry {
    let mut registry = ArtifactRegistry::default();
    registry.insert(ChainKind::Evm, ContractArtifact { abi: JsonAbi::default(), bytecode: vec![0x60, 0x80].into() });
    registry
}

#[tokio::test]
async fn full_run_records_every_phase() {
    let chain = MockChain::new();
    let deployer = PrivateKeySigner::random();
    chain.set_balance(deployer.address(), ETHER);
    let registry = registry();
    let artifact = registry.get(ChainKind::Evm).unwrap();

    let report = BenchmarkRun::new(&chain, &network(None), deployer, settings(false))
        .with_summaries(false)
        .run(artifact)
        .await
        .unwrap();

    assert_eq!(report.network, "mock");
    assert_eq!(report.chain_id, 31337);
    assert_eq!(report.contract, Some(ORACLE));

    let counts = Phase::all().map(|phase| report.gas.phase(phase).transaction_count()).collect::<Vec<_>>();
    assert_eq!(counts, vec![1, 3, 15, 1]);
    assert_eq!(report.gas.deployment.total_gas_used, U256::from(DEPLOY_GAS));
    assert_eq!(report.gas.registering.total_gas_used, U256::from(3 * REGISTER_GAS));
    assert_eq!(report.gas.finalize.total_gas_used, U256::from(FINALIZE_GAS));
    assert_eq!(report.gas.totals().transactions, 20);
    assert_eq!(report.gas.network_gas_price(), U256::from(100));

    let table = report.phase_table().to_string();
    assert!(table.starts_with("Gas report for mock:"), "{table}");
    assert!(table.contains("Update Prices"), "{table}");
}

#[tokio::test]
async fn refund_returns_leftover_funds() {
    let chain = MockChain::new();
    let deployer = PrivateKeySigner::random();
    let deployer_address = deployer.address();
    chain.set_balance(deployer_address, ETHER);

    let report = BenchmarkRun::new(&chain, &network(None), deployer, settings(true))
        .with_summaries(false)
        .run_existing(ORACLE)
        .await
        .unwrap();

    // Without the deploy phase the deployer only paid for funding, finalizing and the providers'
    // gas; everything else came back.
    let funding_fees = U256::from(3 * 21_000 * 100);
    let finalize_fee = U256::from(FINALIZE_GAS * 100);
    let provider_gas = report.gas.registering.total_gas_cost + report.gas.updating_prices.total_gas_cost;
    let refund_fees = U256::from(3 * 21_000 * 100);
    assert_eq!(
        chain.balance_of(deployer_address),
        ETHER - funding_fees - finalize_fee - provider_gas - refund_fees
    );
    assert!(report.gas.deployment.is_empty());
}

#[test]
fn missing_artifact_is_reported() {
    let err = ArtifactRegistry::default().get(ChainKind::ZkSync).unwrap_err();
    assert!(matches!(err, BenchError::MissingArtifact(ChainKind::ZkSync)));
    assert!(err.to_string().contains("zksync"), "{err}");
}

#[tokio::test]
async fn matrix_compares_two_runs() {
    let mut reports = Vec::new();
    for price in [100, 300] {
        let chain = MockChain::new().with_receipt_price(Some(price)).with_network_price(Some(price));
        let deployer = PrivateKeySigner::random();
        chain.set_balance(deployer.address(), ETHER);
        let mut settings = settings(false);
        settings.update_bound = UpdateBound::Count(1);
        let report = BenchmarkRun::new(&chain, &network(None), deployer, settings)
            .with_summaries(false)
            .run(registry().get(ChainKind::Evm).unwrap())
            .await
            .unwrap();
        reports.push(report);
    }

    let parameters =
        MatrixParameters { data_provider_count: 3, update_bound: UpdateBound::Count(1).to_string() };
    let matrix = GasCostsMatrix::new(parameters, &reports).to_string();
    assert!(matrix.starts_with("========= Gas Costs Matrix ========="), "{matrix}");
    for section in ["Deployment Data:", "Registration Data:", "Update Price Data:", "Finalize Price Data:", "Summary Data:"]
    {
        assert!(matrix.contains(section), "missing {section}:\n{matrix}");
    }
    assert!(matrix.contains("Delta"), "{matrix}");
}
