mod mock;
mod phases;
mod runner;

use alloy_primitives::U256;
use oracle_bench::wallets::DataProviders;
use oracle_bench_config::{ChainKind, ResolvedNetwork};

/// One ether, in wei.
pub const ETHER: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

pub fn network(fallback_gas_price: Option<u128>) -> ResolvedNetwork {
    ResolvedNetwork {
        name: "mock".to_string(),
        rpc_url: "http://127.0.0.1:8545".parse().unwrap(),
        chain_id: 31337,
        kind: ChainKind::Evm,
        key_env: "MOCK_PRIVATE_KEY".to_string(),
        fallback_gas_price,
        estimated_gas_used: None,
        l1_rpc_url: None,
    }
}

/// Generates `count` providers, each holding one ether on `chain`.
pub fn funded_providers(chain: &mock::MockChain, count: usize) -> DataProviders {
    let providers = DataProviders::generate(count);
    for address in providers.addresses() {
        chain.set_balance(address, ETHER);
    }
    providers
}
