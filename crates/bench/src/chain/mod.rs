//! Access to the networks the oracle is benchmarked on.
//!
//! Phase runners only talk to an [`OracleChain`]. The RPC backed implementation is generic over
//! a [`ChainFlavor`], which supplies what differs between plain EVM chains and ZKsync: how to
//! build a provider and how to build a deployment transaction.

use crate::{
    artifacts::ContractArtifact,
    contract::{DataProviderState, OracleCall},
    error::BenchResult,
};
use alloy_primitives::{Address, B256, U256};
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use oracle_bench_config::{ChainKind, ResolvedNetwork};
use std::sync::Arc;

mod evm;
pub use evm::{EvmChain, EvmFlavor};

mod rpc;
pub use rpc::{ChainFlavor, RpcChain};

mod zksync;
pub use zksync::{ZkSyncChain, ZkSyncFlavor};

/// Gas a plain value transfer costs.
pub const TRANSFER_GAS: u64 = 21_000;

/// What a mined transaction reported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxOutcome {
    pub tx_hash: B256,
    pub gas_used: u64,
    /// `None` if the receipt carried no price, or a zero one.
    pub effective_gas_price: Option<u128>,
    /// Set for contract creations.
    pub contract_address: Option<Address>,
}

/// Operations the benchmark performs against a network.
///
/// Every sending method waits for the receipt and fails with
/// [`BenchError::TransactionFailure`](crate::error::BenchError::TransactionFailure) if the
/// transaction reverted.
#[async_trait]
pub trait OracleChain: Send + Sync {
    /// Name of the network, as listed in the network table.
    fn name(&self) -> &str;

    fn kind(&self) -> ChainKind;

    /// Deploys the oracle from `from`.
    async fn deploy(&self, from: &PrivateKeySigner, artifact: &ContractArtifact) -> BenchResult<TxOutcome>;

    /// Sends one oracle call from `from`.
    async fn send(&self, from: &PrivateKeySigner, contract: Address, call: OracleCall) -> BenchResult<TxOutcome>;

    /// Sends `value` wei from `from` to `to`.
    async fn transfer(&self, from: &PrivateKeySigner, to: Address, value: U256) -> BenchResult<TxOutcome>;

    async fn balance(&self, address: Address) -> BenchResult<U256>;

    /// Current gas price of the network.
    async fn gas_price(&self) -> BenchResult<u128>;

    /// Current gas price of the settlement layer, `None` if no L1 endpoint is configured.
    async fn l1_gas_price(&self) -> BenchResult<Option<u128>>;

    /// Reads `getPrice()`.
    async fn price(&self, contract: Address) -> BenchResult<U256>;

    /// Reads `dataProviders(provider)`.
    async fn provider_state(&self, contract: Address, provider: Address) -> BenchResult<DataProviderState>;
}

/// Connects to `network` with the client matching its kind.
pub fn connect(network: &ResolvedNetwork) -> Arc<dyn OracleChain> {
    match network.kind {
        ChainKind::Evm => Arc::new(EvmChain::new(network)),
        ChainKind::ZkSync => Arc::new(ZkSyncChain::new(network)),
    }
}
