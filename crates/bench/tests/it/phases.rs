use crate::{
    ETHER, funded_providers,
    mock::{DEPLOY_GAS, FINALIZE_GAS, MockChain, ORACLE, REGISTER_GAS, update_gas},
};
use alloy_json_abi::JsonAbi;
use alloy_primitives::{Address, I256, U256};
use alloy_signer_local::PrivateKeySigner;
use oracle_bench::{
    artifacts::ContractArtifact,
    cmd::estimate::estimate_cost,
    error::BenchError,
    funding::{fund_providers, refund_providers},
    measure::Meter,
    phases::{self, UpdateBound},
    wallets::DataProviders,
};
use oracle_bench_common::{GasTracker, Phase};
use similar_asserts::assert_eq;
use std::time::Duration;

fn artifact() -> ContractArtifact {
    ContractArtifact { abi: JsonAbi::default(), bytecode: vec![0x60, 0x80, 0x60, 0x40].into() }
}

#[tokio::test]
async fn deploy_records_one_transaction() {
    let chain = MockChain::new().with_l1_price(7);
    let tracker = GasTracker::new();
    let deployer = PrivateKeySigner::random();
    chain.set_balance(deployer.address(), ETHER);

    let meter = Meter::new(&chain, &tracker, None);
    let address = phases::deploy(&meter, &deployer, &artifact()).await.unwrap();
    assert_eq!(address, ORACLE);

    let snapshot = tracker.snapshot();
    let record = snapshot.phase(Phase::Deployment);
    assert_eq!(record.transaction_count(), 1);
    assert_eq!(record.total_gas_used, U256::from(DEPLOY_GAS));
    assert_eq!(record.total_gas_cost, U256::from(DEPLOY_GAS * 100));
    assert_eq!(record.total_balance_difference, I256::from_raw(U256::from(DEPLOY_GAS * 100)));
    assert_eq!(record.gas_price, U256::from(100));
    assert_eq!(record.l1_gas_price, Some(U256::from(7)));
}

#[tokio::test]
async fn concurrent_updates_are_all_recorded() {
    let chain = MockChain::new();
    let tracker = GasTracker::new();
    let providers = funded_providers(&chain, 3);
    let meter = Meter::new(&chain, &tracker, None);

    phases::register(&meter, ORACLE, &providers).await.unwrap();
    let updates = phases::update(&meter, ORACLE, &providers, UpdateBound::Count(2)).await.unwrap();
    assert_eq!(updates, 6);

    let snapshot = tracker.snapshot();
    let register = snapshot.phase(Phase::Registering);
    assert_eq!(register.transaction_count(), 3);
    assert_eq!(register.provider_count(), 3);
    assert_eq!(register.total_gas_used, U256::from(3 * REGISTER_GAS));

    let update = snapshot.phase(Phase::UpdatingPrices);
    let per_provider = update_gas(0) + update_gas(1);
    assert_eq!(update.transaction_count(), 6);
    assert_eq!(update.provider_count(), 3);
    assert_eq!(update.total_gas_used, U256::from(127_500));
    assert_eq!(update.total_gas_used, U256::from(3 * per_provider));
    assert_eq!(update.total_gas_cost, U256::from(12_750_000));
    assert_eq!(update.total_balance_difference, I256::from_raw(U256::from(12_750_000)));
    assert_eq!(update.median_gas_cost(), U256::from(2_125_000));

    for address in providers.addresses() {
        assert!(!chain.state_of(address).id.is_zero());
    }
}

#[tokio::test]
async fn empty_provider_set_records_nothing() {
    let chain = MockChain::new();
    let tracker = GasTracker::new();
    let providers = DataProviders::generate(0);
    let meter = Meter::new(&chain, &tracker, None);

    phases::register(&meter, ORACLE, &providers).await.unwrap();
    let updates = phases::update(&meter, ORACLE, &providers, UpdateBound::Count(5)).await.unwrap();
    assert_eq!(updates, 0);

    let snapshot = tracker.snapshot();
    assert!(snapshot.phase(Phase::Registering).is_empty());
    assert!(snapshot.phase(Phase::UpdatingPrices).is_empty());
    assert_eq!(snapshot.totals().gas_used, U256::ZERO);
}

#[tokio::test]
async fn duration_bound_updates_until_deadline() {
    let chain = MockChain::new();
    let tracker = GasTracker::new();
    let providers = funded_providers(&chain, 2);
    let meter = Meter::new(&chain, &tracker, None);

    let bound = UpdateBound::Duration { total: Duration::from_millis(60), interval: Duration::from_millis(10) };
    let updates = phases::update(&meter, ORACLE, &providers, bound).await.unwrap();

    let record = tracker.snapshot().updating_prices;
    assert!(updates >= 2, "{updates}");
    assert_eq!(record.transaction_count(), updates);
    assert_eq!(record.provider_count(), 2);
}

#[tokio::test]
async fn finalize_returns_mean_price() {
    let chain = MockChain::new();
    let tracker = GasTracker::new();
    let owner = PrivateKeySigner::random();
    chain.set_balance(owner.address(), ETHER);
    let providers = funded_providers(&chain, 2);
    let meter = Meter::new(&chain, &tracker, None);

    phases::register(&meter, ORACLE, &providers).await.unwrap();
    phases::update(&meter, ORACLE, &providers, UpdateBound::Count(1)).await.unwrap();
    let expected = providers
        .addresses()
        .into_iter()
        .map(|address| chain.state_of(address).temp_price)
        .sum::<U256>()
        / U256::from(2);

    let price = phases::finalize(&meter, ORACLE, &owner).await.unwrap();
    assert_eq!(price, expected);
    assert!(price < U256::from(1_000));
    assert_eq!(tracker.snapshot().finalize.total_gas_used, U256::from(FINALIZE_GAS));
}

#[tokio::test]
async fn missing_gas_price_without_fallback_fails() {
    let chain = MockChain::new().with_receipt_price(None).with_network_price(None);
    let tracker = GasTracker::new();
    let owner = PrivateKeySigner::random();
    let meter = Meter::new(&chain, &tracker, None);

    let err = phases::finalize(&meter, ORACLE, &owner).await.unwrap_err();
    assert!(matches!(err, BenchError::MissingGasInfo { phase: Phase::Finalize, .. }), "{err}");
    assert!(tracker.snapshot().finalize.is_empty());
}

#[tokio::test]
async fn fallback_gas_price_is_used() {
    let chain = MockChain::new().with_receipt_price(None).with_network_price(None);
    let tracker = GasTracker::new();
    let owner = PrivateKeySigner::random();
    let meter = Meter::new(&chain, &tracker, Some(250_000_000));

    phases::finalize(&meter, ORACLE, &owner).await.unwrap();
    let record = tracker.snapshot().finalize;
    assert_eq!(record.gas_price, U256::from(250_000_000));
    assert_eq!(record.total_gas_cost, U256::from(FINALIZE_GAS) * U256::from(250_000_000));
    // Nothing was charged by the node.
    assert_eq!(record.total_balance_difference, I256::ZERO);
}

#[tokio::test]
async fn network_gas_price_is_used_when_receipt_has_none() {
    let chain = MockChain::new().with_receipt_price(None).with_network_price(Some(42));
    let tracker = GasTracker::new();
    let owner = PrivateKeySigner::random();
    chain.set_balance(owner.address(), ETHER);
    let meter = Meter::new(&chain, &tracker, Some(1));

    phases::finalize(&meter, ORACLE, &owner).await.unwrap();
    assert_eq!(tracker.snapshot().finalize.gas_price, U256::from(42));
}

#[tokio::test]
async fn zero_gas_used_is_missing_gas_info() {
    let chain = MockChain::new().with_zero_gas();
    let tracker = GasTracker::new();
    let owner = PrivateKeySigner::random();
    let meter = Meter::new(&chain, &tracker, Some(1));

    let err = phases::finalize(&meter, ORACLE, &owner).await.unwrap_err();
    assert!(matches!(err, BenchError::MissingGasInfo { .. }), "{err}");
}

#[tokio::test]
async fn reverted_transaction_is_a_failure() {
    let owner = PrivateKeySigner::random();
    let chain = MockChain::new().reverting_for(owner.address());
    chain.set_balance(owner.address(), ETHER);
    let tracker = GasTracker::new();
    let meter = Meter::new(&chain, &tracker, None);

    let err = phases::finalize(&meter, ORACLE, &owner).await.unwrap_err();
    match err {
        BenchError::TransactionFailure { from, .. } => assert_eq!(from, owner.address()),
        err => panic!("unexpected error: {err}"),
    }
}

#[tokio::test]
async fn funding_failure_names_the_provider() {
    let providers = DataProviders::generate(3);
    let failing = providers.addresses()[1];
    let chain = MockChain::new().failing_transfers_to(failing);
    let funder = PrivateKeySigner::random();
    chain.set_balance(funder.address(), ETHER);

    let err = fund_providers(&chain, &funder, &providers, U256::from(1_000_000)).await.unwrap_err();
    match err {
        BenchError::FundingFailure { provider, .. } => assert_eq!(provider, failing),
        err => panic!("unexpected error: {err}"),
    }
    // Funding is sequential, so only the first provider got paid.
    assert_eq!(chain.balance_of(providers.addresses()[0]), U256::from(1_000_000));
    assert_eq!(chain.balance_of(providers.addresses()[2]), U256::ZERO);
}

#[tokio::test]
async fn refund_skips_wallets_that_cannot_pay_the_fee() {
    let chain = MockChain::new();
    let recipient = Address::repeat_byte(0xaa);
    let providers = DataProviders::generate(2);
    let addresses = providers.addresses();
    let (rich, poor) = (addresses[0], addresses[1]);
    chain.set_balance(rich, ETHER);
    chain.set_balance(poor, U256::from(100 * 21_000));

    let summary = refund_providers(&chain, &providers, recipient).await;
    assert_eq!(summary.transfers, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.refunded, ETHER - U256::from(100 * 21_000));
    assert_eq!(chain.balance_of(rich), U256::ZERO);
    assert_eq!(chain.balance_of(recipient), summary.refunded);
}

#[tokio::test]
async fn estimate_carries_the_price_error() {
    let chain = MockChain::new().with_network_price(None);
    let estimate = estimate_cost(&chain, 694_564).await;
    assert_eq!(estimate.gas_price, None);
    assert_eq!(estimate.cost, U256::ZERO);
    assert!(estimate.error.unwrap().contains("eth_gasPrice"));

    let chain = MockChain::new().with_network_price(Some(2_000_000_000));
    let estimate = estimate_cost(&chain, 694_564).await;
    assert_eq!(estimate.cost, U256::from(694_564u64 * 2_000_000_000));
}

#[tokio::test]
async fn registration_without_provider_id_fails() {
    let providers = DataProviders::generate(2);
    let missing = providers.addresses()[1];
    let chain = MockChain::new().ignoring_registration_of(missing);
    for address in providers.addresses() {
        chain.set_balance(address, ETHER);
    }
    let tracker = GasTracker::new();
    let meter = Meter::new(&chain, &tracker, None);

    let err = phases::register(&meter, ORACLE, &providers).await.unwrap_err();
    match err {
        BenchError::NotRegistered(provider) => assert_eq!(provider, missing),
        err => panic!("unexpected error: {err}"),
    }
    // Both transactions were still mined and recorded.
    assert_eq!(tracker.snapshot().registering.transaction_count(), 2);
}
